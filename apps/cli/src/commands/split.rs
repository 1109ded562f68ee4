//! `splitbill split`: confirm a bill file and print who owes what.

use std::path::PathBuf;

use clap::Args;
use tracing::{info, warn};

use super::read_input;
use crate::bill_file::BillFile;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::render::{self, SplitReport};

#[derive(Debug, Args)]
pub struct SplitArgs {
    /// Bill file written by `splitbill draft` (`-` for stdin)
    pub bill: PathBuf,

    /// Print the split as JSON (amounts in cents)
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: &SplitArgs, config: &CliConfig) -> CliResult<String> {
    let contents = read_input(Some(args.bill.as_path()))?;
    split_text(&contents, args.json, config)
}

fn split_text(contents: &str, json: bool, config: &CliConfig) -> CliResult<String> {
    let bill = BillFile::from_toml_str(contents)?.into_draft()?.confirm()?;
    for name in bill.duplicate_names() {
        warn!(item = %name, "Several items share this name; each keeps its own assignees");
    }

    let split = bill.split()?;
    info!(
        items = bill.items().len(),
        participants = bill.participants().len(),
        total = %split.total,
        "Bill split"
    );

    if json {
        let mut out = serde_json::to_string_pretty(&SplitReport::new(&bill, &split))?;
        out.push('\n');
        return Ok(out);
    }
    Ok(render::split_report(&bill, &split, &config.display.currency_symbol))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use splitbill_core::{SplitError, ValidationError};

    const BILL: &str = r#"
participants = ["Alice", "Bob"]

[[items]]
name = "Water"
price = "2.00"
shared_by = ["Alice"]

[[items]]
name = "Water"
price = "3.00"
shared_by = ["Bob"]

[[items]]
name = ""
price = "0.00"
"#;

    #[test]
    fn test_same_name_items_stay_apart() {
        let out = split_text(BILL, false, &CliConfig::default()).unwrap();
        assert!(out.contains("Total bill: $5.00"));
        assert!(out.contains("Alice   $2.00      40.0%"));
        assert!(out.contains("Bob     $3.00      60.0%"));
    }

    #[test]
    fn test_json() {
        let out = split_text(BILL, true, &CliConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["total"], 500);
        assert_eq!(value["items"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_unknown_participant_is_reported() {
        let bill = "participants = [\"Alice\"]\n[[items]]\nname = \"Tea\"\nprice = \"3.00\"\nshared_by = [\"Carol\"]\n";
        let err = split_text(bill, false, &CliConfig::default()).unwrap_err();

        assert!(matches!(
            err,
            CliError::Split(SplitError::InvalidInput(
                ValidationError::UnknownParticipant { .. }
            ))
        ));
        assert_eq!(
            err.to_string(),
            "Invalid input: Tea is assigned to unknown participant 'Carol'"
        );
    }

    #[test]
    fn test_reads_bill_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bill.toml");
        std::fs::write(&path, BILL).unwrap();

        let args = SplitArgs {
            bill: path,
            json: false,
        };
        let out = execute(&args, &CliConfig::default()).unwrap();
        assert!(out.starts_with("Items:\n"));
    }
}
