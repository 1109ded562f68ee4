//! # Domain Types
//!
//! Core domain types used throughout splitbill.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │   SplitResult   │   │ParticipantShare │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name           │   │  total          │   │  name           │       │
//! │  │  unit_price     │   │  shares ────────┼──►│  owed           │       │
//! │  │  quantity       │   │                 │   │  percentage     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │     ItemId      │   │   Percentage    │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  UUID v4        │   │  tenths (i64)   │                             │
//! │  │  per confirmed  │   │  643 = 64.3%    │                             │
//! │  │  item           │   └─────────────────┘                             │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! A confirmed item has:
//! - `id`: UUID v4, immutable, used to key assignments
//! - `name`: human-readable, may repeat ("Water" twice on one receipt)

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;

// =============================================================================
// Line Item
// =============================================================================

/// One purchasable entry on a bill.
///
/// ## Invariants
/// - `name` is non-empty after trimming
/// - `unit_price >= 0`
/// - `quantity >= 1` (receipts never encode quantity, so parsed items get 1)
///
/// The parser only ever builds items that satisfy these. Items edited by a
/// human are re-checked by [`crate::validation::validate_line_item`] before
/// allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    pub name: String,
    pub unit_price: Money,
    pub quantity: i64,
}

impl LineItem {
    /// Creates a single-unit item.
    pub fn new(name: impl Into<String>, unit_price: Money) -> Self {
        LineItem {
            name: name.into(),
            unit_price,
            quantity: 1,
        }
    }

    /// Returns the same item with a different quantity.
    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    /// Calculates the line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// Line total, or `None` if it does not fit in the money range.
    #[inline]
    pub fn checked_line_total(&self) -> Option<Money> {
        self.unit_price.checked_mul_quantity(self.quantity)
    }

    /// One-line description used when asking who shared the item.
    ///
    /// ## Example
    /// ```rust
    /// use splitbill_core::{LineItem, Money};
    ///
    /// let soda = LineItem::new("Soda", Money::from_cents(200)).with_quantity(2);
    /// assert_eq!(soda.label_with("$"), "Soda — $2.00 ×2 = $4.00");
    /// ```
    pub fn label_with(&self, symbol: &str) -> String {
        format!(
            "{} — {} ×{} = {}",
            self.name,
            self.unit_price.format_with(symbol),
            self.quantity,
            self.line_total().format_with(symbol)
        )
    }
}

impl fmt::Display for LineItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label_with("$"))
    }
}

// =============================================================================
// Item Identifier
// =============================================================================

/// Stable synthetic identifier for a confirmed item.
///
/// Names are not unique on real receipts, so assignments made after
/// confirmation are keyed by this instead of by the item name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemId(String);

impl ItemId {
    /// Generates a fresh UUID v4 identifier.
    pub fn new() -> Self {
        ItemId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        ItemId::new()
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        ItemId(id)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        ItemId(id.to_string())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Percentage
// =============================================================================

/// A share of the bill in tenths of a percent.
///
/// ## Why Tenths?
/// Results are reported to one decimal place. Storing 643 for 64.3% keeps
/// the value exact, the same way money is kept in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Percentage(i64);

impl Percentage {
    /// Creates a percentage from tenths of a percent.
    #[inline]
    pub const fn from_tenths(tenths: i64) -> Self {
        Percentage(tenths)
    }

    /// Zero percent.
    #[inline]
    pub const fn zero() -> Self {
        Percentage(0)
    }

    /// Computes `part / whole × 100`, rounded to one decimal place.
    ///
    /// Exact halves round to the even tenth, so 6.25% reports as 6.2% and
    /// 31.25% as 31.2%.
    ///
    /// ## Zero-Total Guard
    /// A bill whose total is zero (no items, or only free items) has no
    /// meaningful proportions, so every share is reported as 0%.
    ///
    /// ## Example
    /// ```rust
    /// use splitbill_core::{Money, Percentage};
    ///
    /// let pct = Percentage::of(Money::from_cents(900), Money::from_cents(1400));
    /// assert_eq!(pct.tenths(), 643); // 64.2857… → 64.3
    ///
    /// assert_eq!(Percentage::of(Money::zero(), Money::zero()).tenths(), 0);
    /// ```
    pub fn of(part: Money, whole: Money) -> Self {
        if whole.cents() <= 0 {
            return Percentage::zero();
        }

        let scaled = i128::from(part.cents()) * 1000;
        let whole = i128::from(whole.cents());
        let (quotient, remainder) = (scaled.div_euclid(whole), scaled.rem_euclid(whole));
        let tenths = match (2 * remainder).cmp(&whole) {
            Ordering::Greater => quotient + 1,
            Ordering::Equal => quotient + (quotient & 1),
            Ordering::Less => quotient,
        };

        Percentage(i64::try_from(tenths).unwrap_or(i64::MAX))
    }

    /// Returns the value in tenths of a percent.
    #[inline]
    pub const fn tenths(&self) -> i64 {
        self.0
    }

    /// Returns the value as a percentage (for display only).
    #[inline]
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 10.0
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Percentage::zero()
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{}%", sign, (self.0 / 10).abs(), (self.0 % 10).abs())
    }
}

// =============================================================================
// Split Result
// =============================================================================

/// One participant's line in the split report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ParticipantShare {
    pub name: String,
    pub owed: Money,
    pub percentage: Percentage,
}

/// Output of the allocation engine.
///
/// ## Invariants
/// - `shares` lists every declared participant once, in declaration order,
///   including those who owe nothing
/// - `total` is the sum of every line total, assigned or not
/// - `allocated()` equals the sum of line totals of items shared by at least
///   one participant, to the cent
/// - percentages are rounded independently and need not add up to 100.0%
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SplitResult {
    pub total: Money,
    pub shares: Vec<ParticipantShare>,
}

impl SplitResult {
    /// Amount owed by a participant, if they were declared.
    pub fn owed(&self, name: &str) -> Option<Money> {
        self.share(name).map(|s| s.owed)
    }

    /// Percentage of the bill for a participant, if they were declared.
    pub fn percentage(&self, name: &str) -> Option<Percentage> {
        self.share(name).map(|s| s.percentage)
    }

    pub fn share(&self, name: &str) -> Option<&ParticipantShare> {
        self.shares.iter().find(|s| s.name == name)
    }

    /// Sum of everything charged to participants.
    pub fn allocated(&self) -> Money {
        self.shares.iter().map(|s| s.owed).sum()
    }

    /// Part of the total that nobody was charged for (unassigned items).
    pub fn unallocated(&self) -> Money {
        self.total - self.allocated()
    }
}

// =============================================================================
// Participants
// =============================================================================

/// Default display names for a party of `count` people.
///
/// ## Example
/// ```rust
/// use splitbill_core::default_participants;
///
/// assert_eq!(default_participants(2), vec!["Person 1", "Person 2"]);
/// ```
pub fn default_participants(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("Person {}", i)).collect()
}

/// Collapses repeated display names, keeping each at its first position.
///
/// Two people typed in with the same name are one person for aggregation.
pub fn dedupe_participants<S: AsRef<str>>(participants: &[S]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(participants.len());
    for name in participants {
        let name = name.as_ref();
        if !unique.iter().any(|existing| existing == name) {
            unique.push(name.to_string());
        }
    }
    unique
}

// =============================================================================
// Unit Tests
// =============================================================================
