//! # splitbill-core: Receipt Parsing and Bill Splitting
//!
//! This crate is the **heart** of splitbill. It contains all business logic
//! and does no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        splitbill Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              OCR engine (external, not in this repo)            │   │
//! │  │                  image ──► raw multi-line text                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ splitbill-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  receipt  │  │   bill    │  │allocation │  │   money   │  │   │
//! │  │   │  parser   │─►│  review   │─►│  engine   │  │  cents    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO SHARED STATE • PURE FUNCTIONS                     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              splitbill-cli (presentation layer)                 │   │
//! │  │         files, config, logging, tables, JSON output             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`receipt`] - OCR text → candidate line items
//! - [`bill`] - Human review: drafts, confirmation, stable item ids
//! - [`allocation`] - Items + assignments → who owes what
//! - [`money`] - Cent amounts and even splitting
//! - [`types`] - Domain types (LineItem, SplitResult, Percentage, ...)
//! - [`validation`] - Item and assignment rules
//! - [`error`] - SplitError and ValidationError
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output (item ids aside)
//! 2. **No I/O**: no files, no network, no terminal
//! 3. **Integer Money**: all monetary values are cents (i64)
//! 4. **Explicit Errors**: typed errors, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use splitbill_core::{parse_receipt, BillDraft, Money};
//!
//! let candidates = parse_receipt("Pizza 10 00\nSoda 2.00\nTOTAL");
//! let mut draft = BillDraft::from_candidates(
//!     vec!["Alice".to_string(), "Bob".to_string()],
//!     candidates,
//! );
//! draft.items[0].shared_by = vec!["Alice".to_string(), "Bob".to_string()];
//! draft.items[1].quantity = 2;
//! draft.items[1].shared_by = vec!["Alice".to_string()];
//!
//! let split = draft.confirm()?.split()?;
//! assert_eq!(split.total, Money::from_cents(1400));
//! assert_eq!(split.owed("Alice"), Some(Money::from_cents(900)));
//! assert_eq!(split.percentage("Bob").unwrap().to_string(), "35.7%");
//! # Ok::<(), splitbill_core::SplitError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod allocation;
pub mod bill;
pub mod error;
pub mod money;
pub mod receipt;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use splitbill_core::Money` instead of
// `use splitbill_core::money::Money`

pub use allocation::{allocate, allocate_bill, NameAssignments};
pub use bill::{BillDraft, BillItem, ConfirmedBill, ItemDraft};
pub use error::{CoreResult, SplitError, ValidationError};
pub use money::Money;
pub use receipt::{parse_receipt, scan_receipt, ParseOptions, ReceiptScan, SkipReason, SkippedLine};
pub use types::*;
