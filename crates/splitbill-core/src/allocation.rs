//! # Allocation Engine
//!
//! Splits item costs among the people who shared them.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. owed[p] = $0.00 for every declared participant (declared order)    │
//! │  2. total   = Σ line_total over ALL items                              │
//! │  3. for each item with assignees A (a true set):                       │
//! │        line_total.split_evenly(|A|) → one share per assignee,          │
//! │        leftover cents to assignees in declared participant order       │
//! │  4. items with no assignees: counted in total, charged to nobody       │
//! │  5. percentage[p] = owed[p] / total × 100, one decimal, 0 if total = 0 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything is integer cents, so the owed amounts add up to the assigned
//! line totals exactly. Percentages are rounded one by one and are allowed to
//! add up to 99.9% or 100.1%.
//!
//! ## Two Entry Points
//! - [`allocate`]: assignments keyed by item name. Every item with a given
//!   name uses the single entry for that name.
//! - [`allocate_bill`]: a [`ConfirmedBill`] where each item carries its own
//!   assignees, so two "Water" lines can be shared differently.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::bill::ConfirmedBill;
use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{dedupe_participants, LineItem, ParticipantShare, Percentage, SplitResult};
use crate::validation::{validate_assignee, validate_line_item};

/// Item name → names of the participants sharing it.
pub type NameAssignments = HashMap<String, HashSet<String>>;

/// Computes the split for items whose assignments are keyed by item name.
///
/// ## Errors
/// `SplitError::InvalidInput` when an item has `quantity < 1` or a negative
/// price, when an assignee is not in `participants`, or when the bill total
/// overflows. Zero items or zero participants are not errors.
///
/// Assignment keys that match no item charge nobody. Their assignees must
/// still be participants.
///
/// ## Example
/// ```rust
/// use std::collections::{HashMap, HashSet};
/// use splitbill_core::{allocate, LineItem, Money};
///
/// let items = vec![LineItem::new("Pizza", Money::from_cents(1000))];
/// let mut assignments = HashMap::new();
/// assignments.insert(
///     "Pizza".to_string(),
///     HashSet::from(["Alice".to_string(), "Bob".to_string()]),
/// );
/// let people = vec!["Alice".to_string(), "Bob".to_string()];
///
/// let split = allocate(&items, &assignments, &people).unwrap();
/// assert_eq!(split.owed("Bob"), Some(Money::from_cents(500)));
/// ```
pub fn allocate(
    items: &[LineItem],
    assignments: &NameAssignments,
    participants: &[String],
) -> CoreResult<SplitResult> {
    let mut ledger = Ledger::new(participants);

    for (name, assignees) in assignments {
        if items.iter().any(|item| &item.name == name) {
            continue;
        }
        // A key with no item charges nobody, but its assignees are still
        // held to the participant list.
        for assignee in assignees {
            validate_assignee(name, assignee, &ledger.names)?;
        }
        warn!(item = %name, "Ignoring assignment for an item that is not on the bill");
    }

    for item in items {
        let assignees = assignments
            .get(&item.name)
            .into_iter()
            .flatten()
            .map(String::as_str);
        ledger.charge(item, assignees)?;
    }

    Ok(ledger.finish())
}

/// Computes the split for a confirmed bill.
///
/// Same rules and errors as [`allocate`], with assignments taken from each
/// [`crate::bill::BillItem`].
pub fn allocate_bill(bill: &ConfirmedBill) -> CoreResult<SplitResult> {
    let mut ledger = Ledger::new(bill.participants());
    for entry in bill.items() {
        ledger.charge(&entry.item, entry.shared_by.iter().map(String::as_str))?;
    }

    Ok(ledger.finish())
}

// =============================================================================
// Ledger
// =============================================================================

/// Running totals for one allocation.
struct Ledger {
    names: Vec<String>,
    owed: Vec<Money>,
    total: Money,
}

impl Ledger {
    fn new(participants: &[String]) -> Self {
        let names = dedupe_participants(participants);
        let owed = vec![Money::zero(); names.len()];
        Ledger {
            names,
            owed,
            total: Money::zero(),
        }
    }

    fn charge<'a>(
        &mut self,
        item: &LineItem,
        assignees: impl IntoIterator<Item = &'a str>,
    ) -> CoreResult<()> {
        let line_total = validate_line_item(item)?;
        self.total = self
            .total
            .checked_add(line_total)
            .ok_or_else(|| ValidationError::Overflow {
                field: "bill total".to_string(),
            })?;

        // Positions in the participant list double as the set of assignees
        // and as the order in which leftover cents are handed out.
        let mut sharers: Vec<usize> = Vec::new();
        for name in assignees {
            let position = validate_assignee(&item.name, name, &self.names)?;
            if !sharers.contains(&position) {
                sharers.push(position);
            }
        }

        if sharers.is_empty() {
            debug!(item = %item.name, %line_total, "Item not shared by anyone");
            return Ok(());
        }

        sharers.sort_unstable();
        let shares = line_total.split_evenly(sharers.len());
        for (position, share) in sharers.iter().zip(shares) {
            self.owed[*position] += share;
        }

        debug!(
            item = %item.name,
            %line_total,
            sharers = sharers.len(),
            "Item allocated"
        );
        Ok(())
    }

    fn finish(self) -> SplitResult {
        let total = self.total;
        let shares = self
            .names
            .into_iter()
            .zip(self.owed)
            .map(|(name, owed)| ParticipantShare {
                name,
                owed,
                percentage: Percentage::of(owed, total),
            })
            .collect();

        SplitResult { total, shares }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SplitError;

    fn people(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn assign(entries: &[(&str, &[&str])]) -> NameAssignments {
        entries
            .iter()
            .map(|(item, who)| {
                (
                    item.to_string(),
                    who.iter().map(|p| p.to_string()).collect(),
                )
            })
            .collect()
    }

    fn cents(c: i64) -> Money {
        Money::from_cents(c)
    }

    #[test]
    fn pizza_and_soda() {
        let items = vec![
            LineItem::new("Pizza", cents(1000)),
            LineItem::new("Soda", cents(200)).with_quantity(2),
        ];
        let assignments = assign(&[("Pizza", &["Alice", "Bob"]), ("Soda", &["Alice"])]);

        let split = allocate(&items, &assignments, &people(&["Alice", "Bob"])).unwrap();

        assert_eq!(split.total, cents(1400));
        assert_eq!(split.owed("Alice"), Some(cents(900)));
        assert_eq!(split.owed("Bob"), Some(cents(500)));
        assert_eq!(split.percentage("Alice"), Some(Percentage::from_tenths(643)));
        assert_eq!(split.percentage("Bob"), Some(Percentage::from_tenths(357)));
    }

    #[test]
    fn unassigned_item_counts_toward_total_only() {
        let items = vec![
            LineItem::new("Pizza", cents(1000)),
            LineItem::new("Bread", cents(300)),
        ];
        let assignments = assign(&[("Pizza", &["Alice"]), ("Bread", &[])]);

        let split = allocate(&items, &assignments, &people(&["Alice", "Bob"])).unwrap();

        assert_eq!(split.total, cents(1300));
        assert_eq!(split.owed("Alice"), Some(cents(1000)));
        assert_eq!(split.owed("Bob"), Some(Money::zero()));
        assert_eq!(split.unallocated(), cents(300));
    }

    #[test]
    fn missing_assignment_entry_is_unassigned() {
        let items = vec![LineItem::new("Bread", cents(300))];
        let split = allocate(&items, &NameAssignments::new(), &people(&["Alice"])).unwrap();
        assert_eq!(split.total, cents(300));
        assert_eq!(split.allocated(), Money::zero());
    }

    #[test]
    fn every_participant_is_reported_in_order() {
        let items = vec![LineItem::new("Tea", cents(250))];
        let assignments = assign(&[("Tea", &["Carol"])]);

        let split =
            allocate(&items, &assignments, &people(&["Alice", "Bob", "Carol"])).unwrap();

        let names: Vec<&str> = split.shares.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
        assert_eq!(split.owed("Alice"), Some(Money::zero()));
        assert_eq!(split.percentage("Alice"), Some(Percentage::zero()));
    }

    #[test]
    fn leftover_cents_follow_declared_order() {
        let items = vec![LineItem::new("Cake", cents(1000))];
        let assignments = assign(&[("Cake", &["Carol", "Alice", "Bob"])]);

        let split =
            allocate(&items, &assignments, &people(&["Bob", "Carol", "Alice"])).unwrap();

        assert_eq!(split.owed("Bob"), Some(cents(334)));
        assert_eq!(split.owed("Carol"), Some(cents(333)));
        assert_eq!(split.owed("Alice"), Some(cents(333)));
        assert_eq!(split.allocated(), split.total);
    }

    #[test]
    fn percentages_are_not_normalized() {
        let items = vec![
            LineItem::new("A", cents(100)),
            LineItem::new("B", cents(100)),
            LineItem::new("C", cents(100)),
        ];
        let assignments = assign(&[("A", &["Ann"]), ("B", &["Ben"]), ("C", &["Cat"])]);

        let split = allocate(&items, &assignments, &people(&["Ann", "Ben", "Cat"])).unwrap();
        let sum: i64 = split.shares.iter().map(|s| s.percentage.tenths()).sum();
        assert_eq!(sum, 999);

        let items = vec![
            LineItem::new("A", cents(2)),
            LineItem::new("B", cents(2)),
            LineItem::new("C", cents(3)),
        ];
        let split = allocate(&items, &assignments, &people(&["Ann", "Ben", "Cat"])).unwrap();
        let sum: i64 = split.shares.iter().map(|s| s.percentage.tenths()).sum();
        assert_eq!(sum, 1001);
    }

    #[test]
    fn shared_name_uses_one_assignment_entry() {
        let items = vec![
            LineItem::new("Water", cents(200)),
            LineItem::new("Water", cents(400)),
        ];
        let assignments = assign(&[("Water", &["Alice", "Bob"])]);

        let split = allocate(&items, &assignments, &people(&["Alice", "Bob"])).unwrap();

        assert_eq!(split.owed("Alice"), Some(cents(300)));
        assert_eq!(split.owed("Bob"), Some(cents(300)));
    }

    #[test]
    fn stray_assignment_keys_are_ignored() {
        let items = vec![LineItem::new("Tea", cents(250))];
        let assignments = assign(&[("Tea", &["Alice"]), ("Ghost", &["Alice"])]);

        let split = allocate(&items, &assignments, &people(&["Alice"])).unwrap();
        assert_eq!(split.owed("Alice"), Some(cents(250)));
        assert_eq!(split.total, cents(250));
    }

    #[test]
    fn stray_key_with_unknown_person_is_rejected() {
        let items = vec![LineItem::new("Tea", cents(250))];
        let assignments = assign(&[("Tea", &["Alice"]), ("Ghost", &["Mallory"])]);

        let err = allocate(&items, &assignments, &people(&["Alice"])).unwrap_err();
        assert_eq!(
            err,
            SplitError::InvalidInput(ValidationError::UnknownParticipant {
                item: "Ghost".to_string(),
                participant: "Mallory".to_string(),
            })
        );

        let no_items = allocate(&[], &assign(&[("Ghost", &["Mallory"])]), &[]);
        assert!(matches!(
            no_items,
            Err(SplitError::InvalidInput(ValidationError::UnknownParticipant { .. }))
        ));
    }

    #[test]
    fn duplicate_participants_count_once() {
        let items = vec![LineItem::new("Tea", cents(300))];
        let assignments = assign(&[("Tea", &["Alice"])]);

        let split = allocate(&items, &assignments, &people(&["Alice", "Bob", "Alice"])).unwrap();
        assert_eq!(split.shares.len(), 2);
        assert_eq!(split.owed("Alice"), Some(cents(300)));
    }

    #[test]
    fn unknown_assignee_is_rejected() {
        let items = vec![LineItem::new("Pizza", cents(1000))];
        let assignments = assign(&[("Pizza", &["Alice", "Mallory"])]);

        let err = allocate(&items, &assignments, &people(&["Alice"])).unwrap_err();
        assert_eq!(
            err,
            SplitError::InvalidInput(ValidationError::UnknownParticipant {
                item: "Pizza".to_string(),
                participant: "Mallory".to_string(),
            })
        );
    }

    #[test]
    fn invalid_items_are_rejected() {
        let zero_qty = vec![LineItem::new("Soda", cents(200)).with_quantity(0)];
        assert!(matches!(
            allocate(&zero_qty, &NameAssignments::new(), &[]),
            Err(SplitError::InvalidInput(ValidationError::MustBePositive { .. }))
        ));

        let negative = vec![LineItem::new("Refund", cents(-100))];
        assert!(matches!(
            allocate(&negative, &NameAssignments::new(), &[]),
            Err(SplitError::InvalidInput(ValidationError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn total_overflow_is_rejected() {
        let items = vec![
            LineItem::new("A", cents(i64::MAX)),
            LineItem::new("B", cents(1)),
        ];
        assert!(matches!(
            allocate(&items, &NameAssignments::new(), &[]),
            Err(SplitError::InvalidInput(ValidationError::Overflow { .. }))
        ));
    }

    #[test]
    fn empty_inputs_give_empty_result() {
        let split = allocate(&[], &NameAssignments::new(), &[]).unwrap();
        assert_eq!(split.total, Money::zero());
        assert!(split.shares.is_empty());
    }

    #[test]
    fn zero_total_reports_zero_percent() {
        let items = vec![LineItem::new("Tap water", Money::zero())];
        let assignments = assign(&[("Tap water", &["Alice", "Bob"])]);

        let split = allocate(&items, &assignments, &people(&["Alice", "Bob"])).unwrap();
        assert_eq!(split.total, Money::zero());
        assert!(split
            .shares
            .iter()
            .all(|s| s.owed.is_zero() && s.percentage == Percentage::zero()));

        let split = allocate(&[], &NameAssignments::new(), &people(&["Alice"])).unwrap();
        assert_eq!(split.percentage("Alice"), Some(Percentage::zero()));
    }
}
