//! # Error Types
//!
//! Domain-specific error types for splitbill-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  splitbill-core errors (this file)                                     │
//! │  ├── SplitError       - What the allocation/confirmation stage returns │
//! │  └── ValidationError  - The specific rule that was violated            │
//! │                                                                         │
//! │  splitbill-cli errors (separate crate)                                 │
//! │  └── CliError         - I/O, config and file format failures           │
//! │                                                                         │
//! │  Flow: ValidationError → SplitError::InvalidInput → CliError → stderr  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The receipt parser has no error type at all: a line it cannot read is
//! dropped, never reported as a failure.

use thiserror::Error;

// =============================================================================
// Split Error
// =============================================================================

/// Errors returned by bill confirmation and cost allocation.
///
/// Every failure is a caller-contract violation that the presentation layer
/// is expected to surface and re-prompt for. Nothing here is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    /// An item or assignment violated an input invariant.
    ///
    /// ## When This Occurs
    /// - An item reached allocation with `quantity < 1` or a negative price
    /// - An assignment names someone who is not a declared participant
    /// - A line total or bill total does not fit in the money range
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// The specific rule an item or assignment broke.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A field that must not be blank is blank.
    #[error("{field} is required")]
    Required { field: String },

    /// A count below one, such as a quantity of 0.
    #[error("{field} must be positive, got {value}")]
    MustBePositive { field: String, value: i64 },

    /// A number outside its allowed range, such as a negative price.
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        value: i64,
    },

    /// Invalid format (e.g., an amount that is not a number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// An item is shared with someone who is not on the participant list.
    ///
    /// ## User Workflow
    /// ```text
    /// Participants: [Alice, Bob]
    /// Pizza shared by: [Alice, Carol]
    ///      │
    ///      ▼
    /// UnknownParticipant { item: "Pizza", participant: "Carol" }
    ///      │
    ///      ▼
    /// UI shows: "Pizza is assigned to unknown participant 'Carol'"
    /// ```
    #[error("{item} is assigned to unknown participant '{participant}'")]
    UnknownParticipant { item: String, participant: String },

    /// An assignment refers to an item id that is not on the bill.
    #[error("No item with id {id} on this bill")]
    UnknownItem { id: String },

    /// Arithmetic on an amount left the representable range.
    #[error("{field} is too large to represent")]
    Overflow { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with SplitError.
pub type CoreResult<T> = Result<T, SplitError>;

// =============================================================================
// Unit Tests
// =============================================================================
