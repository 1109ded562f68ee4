//! # Bill Confirmation
//!
//! The step between "the parser guessed these items" and "split the bill".
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  parse_receipt ──► BillDraft ──(human edits)──► confirm() ──► Confirmed │
//! │                    rows may be                  drops blank      Bill   │
//! │                    blank or wrong               rows, checks      │     │
//! │                                                 invariants,       │     │
//! │                                                 assigns ItemIds   ▼     │
//! │                                                               split()   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A `ConfirmedBill` is the whole input to the allocation engine in one
//! value. Nothing is read from anywhere else.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::allocation::allocate_bill;
use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{dedupe_participants, ItemId, LineItem, SplitResult};
use crate::validation::{validate_assignee, validate_item_name, validate_line_item};

// =============================================================================
// Drafts
// =============================================================================

/// One editable row of a bill under review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemDraft {
    pub name: String,
    pub unit_price: Money,
    pub quantity: i64,
    /// Participants sharing this row. Repeats are ignored.
    #[serde(default)]
    pub shared_by: Vec<String>,
}

/// A blank row: no name, free, one unit, nobody assigned.
impl Default for ItemDraft {
    fn default() -> Self {
        ItemDraft {
            name: String::new(),
            unit_price: Money::zero(),
            quantity: 1,
            shared_by: Vec::new(),
        }
    }
}

impl From<LineItem> for ItemDraft {
    fn from(item: LineItem) -> Self {
        ItemDraft {
            name: item.name,
            unit_price: item.unit_price,
            quantity: item.quantity,
            shared_by: Vec::new(),
        }
    }
}

/// A bill under review: who is paying and what was bought.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BillDraft {
    pub participants: Vec<String>,
    pub items: Vec<ItemDraft>,
}

impl BillDraft {
    /// Pre-fills a draft from parser candidates.
    ///
    /// There is always at least one row, so a receipt the parser could not
    /// read still gives the reviewer somewhere to type.
    ///
    /// ## Example
    /// ```rust
    /// use splitbill_core::{parse_receipt, BillDraft};
    ///
    /// let draft = BillDraft::from_candidates(vec!["Alice".into()], parse_receipt("smudge"));
    /// assert_eq!(draft.items.len(), 1);
    /// assert!(draft.items[0].name.is_empty());
    /// ```
    pub fn from_candidates(participants: Vec<String>, candidates: Vec<LineItem>) -> Self {
        let mut items: Vec<ItemDraft> = candidates.into_iter().map(ItemDraft::from).collect();
        if items.is_empty() {
            items.push(ItemDraft::default());
        }

        BillDraft {
            participants,
            items,
        }
    }

    /// Validates the draft and freezes it into a [`ConfirmedBill`].
    ///
    /// ## Rules
    /// - Rows whose name is blank after trimming are skipped
    /// - Names are trimmed
    /// - `quantity >= 1` and `unit_price >= 0`
    /// - Every `shared_by` entry must be a participant
    /// - Repeated participant names collapse to one
    ///
    /// Each kept row gets a fresh [`ItemId`].
    pub fn confirm(self) -> CoreResult<ConfirmedBill> {
        let participants = dedupe_participants(&self.participants);
        let mut items = Vec::with_capacity(self.items.len());

        for (row, draft) in self.items.into_iter().enumerate() {
            let Ok(name) = validate_item_name(&draft.name) else {
                debug!(row = row + 1, "Skipping draft row without a name");
                continue;
            };

            let item = LineItem {
                name: name.to_string(),
                unit_price: draft.unit_price,
                quantity: draft.quantity,
            };
            validate_line_item(&item)?;
            for person in &draft.shared_by {
                validate_assignee(&item.name, person, &participants)?;
            }

            items.push(BillItem {
                id: ItemId::new(),
                item,
                shared_by: dedupe_participants(&draft.shared_by),
            });
        }

        debug!(
            participants = participants.len(),
            items = items.len(),
            "Bill confirmed"
        );
        Ok(ConfirmedBill {
            participants,
            items,
        })
    }
}

// =============================================================================
// Confirmed Bill
// =============================================================================

/// A confirmed item with its stable id and the people sharing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct BillItem {
    pub id: ItemId,
    pub item: LineItem,
    pub shared_by: Vec<String>,
}

/// A validated bill, ready to split.
///
/// Only [`BillDraft::confirm`] builds one, so the item and participant
/// invariants always hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct ConfirmedBill {
    participants: Vec<String>,
    items: Vec<BillItem>,
}

impl ConfirmedBill {
    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    pub fn items(&self) -> &[BillItem] {
        &self.items
    }

    pub fn item(&self, id: &ItemId) -> Option<&BillItem> {
        self.items.iter().find(|entry| &entry.id == id)
    }

    /// Replaces the assignees of one item.
    ///
    /// ## Errors
    /// `UnknownItem` for an id that is not on the bill, `UnknownParticipant`
    /// for a name that is not a participant. The bill is unchanged on error.
    pub fn assign<S: AsRef<str>>(&mut self, id: &ItemId, shared_by: &[S]) -> CoreResult<()> {
        let entry = self
            .items
            .iter_mut()
            .find(|entry| &entry.id == id)
            .ok_or_else(|| ValidationError::UnknownItem { id: id.to_string() })?;

        for person in shared_by {
            validate_assignee(&entry.item.name, person.as_ref(), &self.participants)?;
        }

        entry.shared_by = dedupe_participants(shared_by);
        Ok(())
    }

    /// Sum of every line total, assigned or not.
    pub fn total(&self) -> CoreResult<Money> {
        self.items.iter().try_fold(Money::zero(), |acc, entry| {
            entry
                .item
                .checked_line_total()
                .and_then(|line| acc.checked_add(line))
                .ok_or_else(|| {
                    ValidationError::Overflow {
                        field: "bill total".to_string(),
                    }
                    .into()
                })
        })
    }

    /// Item names that occur more than once, in order of first appearance.
    ///
    /// Name-keyed assignment would merge these lines; keying by [`ItemId`]
    /// keeps them apart. Callers can use this to warn the reviewer.
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut duplicates: Vec<&str> = Vec::new();
        for (idx, entry) in self.items.iter().enumerate() {
            let name = entry.item.name.as_str();
            let repeated = self.items[..idx].iter().any(|e| e.item.name == name);
            if repeated && !duplicates.contains(&name) {
                duplicates.push(name);
            }
        }
        duplicates
    }

    /// Runs the allocation engine on this bill.
    pub fn split(&self) -> CoreResult<SplitResult> {
        allocate_bill(self)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SplitError;
    use crate::types::Percentage;

    fn row(name: &str, cents: i64, quantity: i64, shared_by: &[&str]) -> ItemDraft {
        ItemDraft {
            name: name.to_string(),
            unit_price: Money::from_cents(cents),
            quantity,
            shared_by: shared_by.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn draft(participants: &[&str], items: Vec<ItemDraft>) -> BillDraft {
        BillDraft {
            participants: participants.iter().map(|s| s.to_string()).collect(),
            items,
        }
    }

    #[test]
    fn test_from_candidates_keeps_order() {
        let candidates = vec![
            LineItem::new("Coffee", Money::from_cents(350)),
            LineItem::new("Bagel", Money::from_cents(225)),
        ];
        let bill = BillDraft::from_candidates(vec!["Alice".to_string()], candidates);

        assert_eq!(bill.items.len(), 2);
        assert_eq!(bill.items[0].name, "Coffee");
        assert_eq!(bill.items[1].quantity, 1);
        assert!(bill.items[1].shared_by.is_empty());
    }

    #[test]
    fn test_from_candidates_always_has_a_row() {
        let bill = BillDraft::from_candidates(Vec::new(), Vec::new());
        assert_eq!(bill.items, vec![ItemDraft::default()]);
    }

    #[test]
    fn test_confirm_skips_blank_rows_and_trims() {
        let bill = draft(
            &["Alice"],
            vec![
                row("  Pizza ", 1000, 1, &["Alice"]),
                row("", 500, 1, &[]),
                row("   ", 0, 0, &["Nobody"]),
            ],
        )
        .confirm()
        .unwrap();

        assert_eq!(bill.items().len(), 1);
        assert_eq!(bill.items()[0].item.name, "Pizza");
    }

    #[test]
    fn test_confirm_rejects_bad_rows() {
        let err = draft(&["Alice"], vec![row("Soda", 200, 0, &[])])
            .confirm()
            .unwrap_err();
        assert!(matches!(
            err,
            SplitError::InvalidInput(ValidationError::MustBePositive { .. })
        ));

        let err = draft(&["Alice"], vec![row("Soda", -200, 1, &[])])
            .confirm()
            .unwrap_err();
        assert!(matches!(
            err,
            SplitError::InvalidInput(ValidationError::OutOfRange { .. })
        ));

        let err = draft(&["Alice"], vec![row("Soda", 200, 1, &["Bob"])])
            .confirm()
            .unwrap_err();
        assert!(matches!(
            err,
            SplitError::InvalidInput(ValidationError::UnknownParticipant { .. })
        ));
    }

    #[test]
    fn test_confirm_dedupes_people() {
        let bill = draft(
            &["Alice", "Bob", "Alice"],
            vec![row("Tea", 300, 1, &["Bob", "Bob", "Alice"])],
        )
        .confirm()
        .unwrap();

        assert_eq!(bill.participants(), ["Alice", "Bob"]);
        assert_eq!(bill.items()[0].shared_by, vec!["Bob", "Alice"]);
    }

    #[test]
    fn test_assigns_fresh_ids() {
        let bill = draft(
            &["Alice"],
            vec![row("Water", 200, 1, &[]), row("Water", 200, 1, &[])],
        )
        .confirm()
        .unwrap();

        assert_ne!(bill.items()[0].id, bill.items()[1].id);
    }

    #[test]
    fn test_split_pizza_and_soda() {
        let bill = draft(
            &["Alice", "Bob"],
            vec![
                row("Pizza", 1000, 1, &["Alice", "Bob"]),
                row("Soda", 200, 2, &["Alice"]),
            ],
        )
        .confirm()
        .unwrap();

        let split = bill.split().unwrap();
        assert_eq!(split.total, Money::from_cents(1400));
        assert_eq!(split.owed("Alice"), Some(Money::from_cents(900)));
        assert_eq!(split.owed("Bob"), Some(Money::from_cents(500)));
        assert_eq!(split.percentage("Alice"), Some(Percentage::from_tenths(643)));
        assert_eq!(split.percentage("Bob"), Some(Percentage::from_tenths(357)));
    }

    #[test]
    fn test_repeated_assignee_counts_once() {
        let bill = draft(
            &["Alice", "Bob"],
            vec![row("Nachos", 900, 1, &["Alice", "Alice", "Bob"])],
        )
        .confirm()
        .unwrap();

        let split = bill.split().unwrap();
        assert_eq!(split.owed("Alice"), Some(Money::from_cents(450)));
        assert_eq!(split.owed("Bob"), Some(Money::from_cents(450)));
    }

    #[test]
    fn test_same_name_items_split_independently() {
        let mut bill = draft(
            &["Alice", "Bob"],
            vec![row("Water", 200, 1, &[]), row("Water", 300, 1, &[])],
        )
        .confirm()
        .unwrap();
        assert_eq!(bill.duplicate_names(), vec!["Water"]);

        let first = bill.items()[0].id.clone();
        let second = bill.items()[1].id.clone();
        bill.assign(&first, &["Alice"]).unwrap();
        bill.assign(&second, &["Bob"]).unwrap();

        let split = bill.split().unwrap();
        assert_eq!(split.owed("Alice"), Some(Money::from_cents(200)));
        assert_eq!(split.owed("Bob"), Some(Money::from_cents(300)));
    }

    #[test]
    fn test_assign_rejects_unknowns_without_changes() {
        let mut bill = draft(&["Alice"], vec![row("Tea", 300, 1, &["Alice"])])
            .confirm()
            .unwrap();
        let id = bill.items()[0].id.clone();

        let err = bill.assign(&ItemId::from("missing"), &["Alice"]).unwrap_err();
        assert!(matches!(
            err,
            SplitError::InvalidInput(ValidationError::UnknownItem { .. })
        ));

        assert!(bill.assign(&id, &["Alice", "Eve"]).is_err());
        assert_eq!(bill.item(&id).unwrap().shared_by, vec!["Alice"]);
    }

    #[test]
    fn test_draft_json_defaults_shared_by() {
        let json = r#"{"participants":["Alice"],"items":[{"name":"Tea","unit_price":300,"quantity":1}]}"#;
        let bill: BillDraft = serde_json::from_str(json).unwrap();
        assert!(bill.items[0].shared_by.is_empty());
    }

    #[test]
    fn test_total_includes_unassigned_rows() {
        let bill = draft(
            &["Alice"],
            vec![row("Pizza", 1000, 1, &["Alice"]), row("Bread", 150, 2, &[])],
        )
        .confirm()
        .unwrap();

        assert_eq!(bill.total().unwrap(), Money::from_cents(1300));
        assert_eq!(bill.total().unwrap(), bill.split().unwrap().total);
    }
}
