//! `splitbill draft`: turn OCR text into a bill file to review and edit.

use std::path::PathBuf;

use clap::Args;
use splitbill_core::{default_participants, scan_receipt, BillDraft};
use tracing::{info, warn};

use super::read_input;
use crate::bill_file::BillFile;
use crate::config::{CliConfig, MAX_PARTY_SIZE};
use crate::error::{CliError, CliResult};

#[derive(Debug, Args)]
pub struct DraftArgs {
    /// OCR text file (`-` or omitted for stdin)
    pub input: Option<PathBuf>,

    /// Participant names, comma separated
    #[arg(long, value_delimiter = ',', value_name = "NAMES")]
    pub people: Vec<String>,

    /// Number of "Person N" placeholders when --people is not given
    #[arg(long, value_name = "N", conflicts_with = "people")]
    pub party_size: Option<usize>,

    /// Write the bill here instead of stdout
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Overwrite --output if it exists
    #[arg(long, requires = "output")]
    pub force: bool,
}

pub fn execute(args: &DraftArgs, config: &CliConfig) -> CliResult<String> {
    let text = read_input(args.input.as_deref())?;
    let bill = build(&text, args, config)?;

    let Some(path) = &args.output else {
        return Ok(bill);
    };
    if path.exists() && !args.force {
        return Err(CliError::OutputExists(path.clone()));
    }
    std::fs::write(path, bill)?;
    info!(?path, "Draft written");
    Ok(format!(
        "Wrote {}. Edit it, then run: splitbill split {}\n",
        path.display(),
        path.display()
    ))
}

/// Builds the bill file text.
fn build(text: &str, args: &DraftArgs, config: &CliConfig) -> CliResult<String> {
    let participants = participants(args, config)?;
    let scan = scan_receipt(text, &config.parser.parse_options());
    if scan.items.is_empty() {
        warn!("No items recognised in the receipt; writing a blank row");
    }

    let draft = BillDraft::from_candidates(participants, scan.items);
    BillFile::from_draft(&draft).to_toml_string()
}

fn participants(args: &DraftArgs, config: &CliConfig) -> CliResult<Vec<String>> {
    let named: Vec<String> = args
        .people
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();
    if !named.is_empty() {
        return Ok(named);
    }

    let size = args
        .party_size
        .unwrap_or(config.display.default_party_size);
    if size == 0 || size > MAX_PARTY_SIZE {
        return Err(CliError::InvalidConfig(format!(
            "party size must be between 1 and {}, got {}",
            MAX_PARTY_SIZE, size
        )));
    }
    Ok(default_participants(size))
}
