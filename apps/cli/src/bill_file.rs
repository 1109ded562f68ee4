//! # Bill Files
//!
//! The TOML file a person edits between `splitbill draft` and
//! `splitbill split`.
//!
//! ```toml
//! participants = ["Alice", "Bob"]
//!
//! [[items]]
//! name = "Pizza"
//! price = "10.00"
//! quantity = 1
//! shared_by = ["Alice", "Bob"]
//! ```
//!
//! Prices are strings so that `"10.50"` stays exact. `quantity` defaults to
//! 1 and `shared_by` to nobody.

use serde::{Deserialize, Serialize};
use splitbill_core::{BillDraft, ItemDraft, Money};

use crate::error::{CliError, CliResult};

/// Written above every generated bill.
const DRAFT_HEADER: &str = "\
# splitbill draft
#
# Check each item's name, price and quantity against the receipt, then list
# who shared it in `shared_by`. Items with an empty name are ignored.
# Run `splitbill split <this file>` when done.

";

/// One `[[items]]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemEntry {
    #[serde(default)]
    pub name: String,

    #[serde(default = "default_price")]
    pub price: String,

    #[serde(default = "default_quantity")]
    pub quantity: i64,

    #[serde(default)]
    pub shared_by: Vec<String>,
}

fn default_price() -> String {
    "0.00".to_string()
}

fn default_quantity() -> i64 {
    1
}

/// A bill as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillFile {
    #[serde(default)]
    pub participants: Vec<String>,

    #[serde(default)]
    pub items: Vec<ItemEntry>,
}

impl BillFile {
    pub fn from_toml_str(contents: &str) -> CliResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Serializes the bill with the editing instructions on top.
    pub fn to_toml_string(&self) -> CliResult<String> {
        let body = toml::to_string_pretty(self)?;
        Ok(format!("{}{}", DRAFT_HEADER, body))
    }

    pub fn from_draft(draft: &BillDraft) -> Self {
        let items = draft
            .items
            .iter()
            .map(|row| ItemEntry {
                name: row.name.clone(),
                price: row.unit_price.format_with(""),
                quantity: row.quantity,
                shared_by: row.shared_by.clone(),
            })
            .collect();

        BillFile {
            participants: draft.participants.clone(),
            items,
        }
    }

    /// Converts the file into a core draft.
    ///
    /// ## Errors
    /// `CliError::BillRow` (1-based) for a price that is not an amount.
    /// Everything else is left to [`BillDraft::confirm`].
    pub fn into_draft(self) -> CliResult<BillDraft> {
        let items = self
            .items
            .into_iter()
            .enumerate()
            .map(|(idx, entry)| {
                let unit_price: Money = entry
                    .price
                    .parse()
                    .map_err(|source| CliError::BillRow {
                        row: idx + 1,
                        source,
                    })?;

                Ok(ItemDraft {
                    name: entry.name,
                    unit_price,
                    quantity: entry.quantity,
                    shared_by: entry.shared_by,
                })
            })
            .collect::<CliResult<Vec<_>>>()?;

        Ok(BillDraft {
            participants: self.participants,
            items,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use splitbill_core::{default_participants, parse_receipt, ValidationError};

    const PIZZA_NIGHT: &str = r#"
participants = ["Alice", "Bob"]

[[items]]
name = "Pizza"
price = "10.00"
shared_by = ["Alice", "Bob"]

[[items]]
name = "Soda"
price = "2"
quantity = 2
shared_by = ["Alice"]
"#;

    #[test]
    fn test_reads_and_splits() {
        let draft = BillFile::from_toml_str(PIZZA_NIGHT)
            .unwrap()
            .into_draft()
            .unwrap();

        assert_eq!(draft.items[0].quantity, 1);
        assert_eq!(draft.items[1].unit_price, Money::from_cents(200));

        let split = draft.confirm().unwrap().split().unwrap();
        assert_eq!(split.total, Money::from_cents(1400));
        assert_eq!(split.owed("Alice"), Some(Money::from_cents(900)));
    }

    #[test]
    fn test_bad_price_names_the_row() {
        let file = BillFile::from_toml_str(
            "participants = []\n[[items]]\nname = \"Tea\"\nprice = \"3.50\"\n[[items]]\nname = \"Cake\"\nprice = \"four\"\n",
        )
        .unwrap();

        let err = file.into_draft().unwrap_err();
        assert!(matches!(
            err,
            CliError::BillRow {
                row: 2,
                source: ValidationError::InvalidFormat { .. }
            }
        ));
    }

    #[test]
    fn test_draft_survives_a_trip_through_disk() {
        let draft = BillDraft::from_candidates(
            default_participants(2),
            parse_receipt("Coffee 3 50\nBagel 2.25\nTOTAL 5.75"),
        );
        let text = BillFile::from_draft(&draft).to_toml_string().unwrap();
        assert!(text.starts_with("# splitbill draft"));
        assert!(text.contains("price = \"3.50\""));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bill.toml");
        std::fs::write(&path, &text).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let back = BillFile::from_toml_str(&contents)
            .unwrap()
            .into_draft()
            .unwrap();
        assert_eq!(back, draft);
    }

    #[test]
    fn test_blank_row_is_written_and_ignored() {
        let draft = BillDraft::from_candidates(default_participants(1), Vec::new());
        let file = BillFile::from_draft(&draft);
        assert_eq!(file.items[0].name, "");
        assert_eq!(file.items[0].price, "0.00");

        let bill = file.into_draft().unwrap().confirm().unwrap();
        assert!(bill.items().is_empty());
    }
}
