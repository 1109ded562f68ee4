//! # Money
//!
//! Bill amounts as a whole number of cents.
//!
//! ## Splitting Without Losing Cents
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  A $10.00 pizza shared three ways                                       │
//! │                                                                         │
//! │  floats:  10.0 / 3 = 3.333...  → shown as $3.33 each, $0.01 vanishes   │
//! │                                                                         │
//! │  cents:   1000 / 3 = 333 remainder 1                                    │
//! │           split_evenly(3) → [334, 333, 333]                             │
//! │           334 + 333 + 333 = 1000, nothing lost                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use splitbill_core::money::Money;
//!
//! let price: Money = "7.99".parse().unwrap();
//! assert_eq!(price.cents(), 799);
//!
//! let doubled = price * 2;
//! assert_eq!(doubled.to_string(), "$15.98");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// An amount in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: Lets validation see and reject negative prices
///   instead of having them wrap around
/// - **Serialized as a bare integer**: JSON and TypeScript see plain cents
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  OCR token "7 99" ──► parser ──► LineItem.unit_price ──► line_total    │
/// │                                                              │          │
/// │                                        split_evenly(assignees)          │
/// │                                                              │          │
/// │                                   ParticipantShare.owed ◄────┘          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Wraps a cent amount.
    ///
    /// ## Example
    /// ```rust
    /// use splitbill_core::money::Money;
    ///
    /// let espresso = Money::from_cents(275);
    /// assert_eq!(espresso.to_string(), "$2.75");
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Builds a Money value from the digit strings on either side of a
    /// decimal separator, returning `None` on overflow or non-digit input.
    ///
    /// `minor` may hold zero, one or two digits (`"5"` means 50 cents).
    pub(crate) fn checked_from_digits(major: &str, minor: &str) -> Option<Self> {
        if major.is_empty()
            || minor.len() > 2
            || !major.bytes().all(|b| b.is_ascii_digit())
            || !minor.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }

        let major_cents = major
            .bytes()
            .try_fold(0i64, |acc, b| {
                acc.checked_mul(10)?.checked_add(i64::from(b - b'0'))
            })?
            .checked_mul(100)?;

        let minor_cents = match minor.as_bytes() {
            [] => 0,
            [tens] => i64::from(tens - b'0') * 10,
            [tens, ones] => i64::from(tens - b'0') * 10 + i64::from(ones - b'0'),
            _ => return None,
        };

        major_cents.checked_add(minor_cents).map(Money)
    }

    /// Raw cent value.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole units, truncated toward zero.
    ///
    /// ## Example
    /// ```rust
    /// use splitbill_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).dollars(), 10);
    /// assert_eq!(Money::from_cents(-550).dollars(), -5);
    /// ```
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Cents after the decimal point, without sign.
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Unit price times quantity. Panics on overflow in debug builds; the
    /// allocation path uses [`Money::checked_mul_quantity`].
    ///
    /// ## Example
    /// ```rust
    /// use splitbill_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(200); // $2.00
    /// assert_eq!(unit_price.multiply_quantity(2).cents(), 400);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Multiplies money by a quantity, returning `None` on overflow.
    #[inline]
    pub const fn checked_mul_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two Money values, returning `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Splits this amount into `parts` shares that differ by at most one cent
    /// and always sum back to the original amount.
    ///
    /// ## Remainder Rule
    /// ```text
    /// $10.00 split 3 ways
    ///      │
    ///      ▼
    /// 1000 / 3 = 333 remainder 1
    ///      │
    ///      ▼
    /// [334, 333, 333]   ← the first `remainder` shares get one extra cent
    /// ```
    ///
    /// The caller decides what "first" means by the order in which it hands
    /// out the shares. Returns an empty vector when `parts` is zero.
    ///
    /// ## Example
    /// ```rust
    /// use splitbill_core::money::Money;
    ///
    /// let shares = Money::from_cents(1000).split_evenly(3);
    /// let cents: Vec<i64> = shares.iter().map(|m| m.cents()).collect();
    /// assert_eq!(cents, vec![334, 333, 333]);
    /// ```
    pub fn split_evenly(&self, parts: usize) -> Vec<Money> {
        if parts == 0 {
            return Vec::new();
        }

        // A usize that does not fit in i64 cannot be a real assignee count.
        let divisor = i64::try_from(parts).unwrap_or(i64::MAX);
        let base = self.0.div_euclid(divisor);
        let remainder = self.0.rem_euclid(divisor);

        (0..divisor)
            .map(|idx| {
                if idx < remainder {
                    Money(base + 1)
                } else {
                    Money(base)
                }
            })
            .collect()
    }

    /// Formats the amount with a caller-chosen currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use splitbill_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(-550).format_with("€"), "-€5.50");
    /// assert_eq!(Money::from_cents(1099).format_with(""), "10.99");
    /// ```
    pub fn format_with(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// `$` followed by the amount, e.g. `$14.00`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with("$"))
    }
}

/// Parses a user-entered amount such as `"10"`, `"10.5"`, `"10.50"` or
/// `"10,50"`.
///
/// This is the lenient form used for confirmed, human-edited values. The
/// receipt parser uses its own stricter price-token rule.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: reason.to_string(),
        };

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Required {
                field: "amount".to_string(),
            });
        }

        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let (major, minor) = match digits.split_once(['.', ',']) {
            Some((_, "")) => {
                return Err(invalid("missing digits after the decimal separator"));
            }
            Some(parts) => parts,
            None => (digits, ""),
        };

        if minor.len() > 2 {
            return Err(invalid("at most two decimal places are allowed"));
        }

        let amount = Money::checked_from_digits(major, minor)
            .ok_or_else(|| invalid("expected digits with an optional decimal part"))?;

        Ok(if negative { Money(-amount.0) } else { amount })
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
