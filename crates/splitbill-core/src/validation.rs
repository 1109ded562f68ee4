//! # Validation Module
//!
//! Input validation for items and assignments on their way into the
//! allocation engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Receipt parser                                               │
//! │  └── Only emits items with a name, price >= 0 and quantity 1           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Human review (presentation layer)                            │
//! │  └── Names, prices and quantities may be edited                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE, called by the allocation engine                 │
//! │  ├── quantity >= 1, unit_price >= 0                                    │
//! │  └── every assignee is a declared participant                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use splitbill_core::validation::{validate_quantity, validate_unit_price};
//! use splitbill_core::Money;
//!
//! assert!(validate_quantity("Soda", 2).is_ok());
//! assert!(validate_unit_price("Soda", Money::from_cents(-1)).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::LineItem;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates and trims an item name.
///
/// ## Rules
/// - Must not be empty after trimming
///
/// ## Returns
/// The trimmed name.
pub fn validate_item_name(name: &str) -> ValidationResult<&str> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "item name".to_string(),
        });
    }

    Ok(name)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be at least 1
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Review: edit quantity of "Soda"                                       │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity("Soda", 0) ← THIS FUNCTION                          │
/// │       │                                                                 │
/// │       ├── qty < 1? → Error: "quantity of 'Soda' must be positive"      │
/// │       │                                                                 │
/// │       └── OK → item is allocatable                                     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(item: &str, qty: i64) -> ValidationResult<()> {
    if qty < 1 {
        return Err(ValidationError::MustBePositive {
            field: format!("quantity of '{}'", item),
            value: qty,
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items still appear on the bill)
pub fn validate_unit_price(item: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: format!("price of '{}'", item),
            min: 0,
            max: i64::MAX,
            value: price.cents(),
        });
    }

    Ok(())
}

/// Validates an item as a whole and returns its line total.
///
/// ## Rules
/// - `quantity >= 1`
/// - `unit_price >= 0`
/// - `unit_price × quantity` fits in the money range
///
/// The name is deliberately not checked here: the allocation engine accepts
/// whatever the caller confirmed. Blank rows are filtered out earlier, at
/// confirmation time.
pub fn validate_line_item(item: &LineItem) -> ValidationResult<Money> {
    validate_quantity(&item.name, item.quantity)?;
    validate_unit_price(&item.name, item.unit_price)?;

    item.checked_line_total()
        .ok_or_else(|| ValidationError::Overflow {
            field: format!("line total of '{}'", item.name),
        })
}

// =============================================================================
// Assignment Validators
// =============================================================================

/// Checks that an assignee is on the participant list and returns their
/// position in it.
///
/// Unknown names are rejected rather than ignored so a typo in an
/// assignment shows up immediately instead of quietly shrinking someone's
/// share.
pub fn validate_assignee(
    item: &str,
    assignee: &str,
    participants: &[String],
) -> ValidationResult<usize> {
    participants
        .iter()
        .position(|p| p == assignee)
        .ok_or_else(|| ValidationError::UnknownParticipant {
            item: item.to_string(),
            participant: assignee.to_string(),
        })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_item_name() {
        assert_eq!(validate_item_name("  Coffee ").unwrap(), "Coffee");
        assert_eq!(validate_item_name("2% Milk").unwrap(), "2% Milk");
        assert!(validate_item_name("").is_err());
        assert!(validate_item_name("   ").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity("Soda", 1).is_ok());
        assert!(validate_quantity("Soda", 999_999).is_ok());

        assert!(validate_quantity("Soda", 0).is_err());
        assert!(validate_quantity("Soda", -1).is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price("Water", Money::zero()).is_ok());
        assert!(validate_unit_price("Water", Money::from_cents(1099)).is_ok());
        assert!(validate_unit_price("Water", Money::from_cents(-100)).is_err());
    }

    #[test]
    fn test_validate_line_item_returns_total() {
        let soda = LineItem::new("Soda", Money::from_cents(200)).with_quantity(2);
        assert_eq!(validate_line_item(&soda), Ok(Money::from_cents(400)));

        let overflow = LineItem::new("Gold", Money::from_cents(i64::MAX)).with_quantity(3);
        assert!(matches!(
            validate_line_item(&overflow),
            Err(ValidationError::Overflow { .. })
        ));

        let zero_qty = LineItem::new("Soda", Money::from_cents(200)).with_quantity(0);
        assert!(matches!(
            validate_line_item(&zero_qty),
            Err(ValidationError::MustBePositive { value: 0, .. })
        ));
    }

    #[test]
    fn test_validate_assignee() {
        let people = vec!["Alice".to_string(), "Bob".to_string()];
        assert_eq!(validate_assignee("Pizza", "Bob", &people), Ok(1));
        assert_eq!(
            validate_assignee("Pizza", "bob", &people),
            Err(ValidationError::UnknownParticipant {
                item: "Pizza".to_string(),
                participant: "bob".to_string(),
            })
        );
    }
}
