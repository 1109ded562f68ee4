//! `splitbill parse`: show what the parser finds in OCR text.

use std::path::PathBuf;

use clap::Args;
use splitbill_core::scan_receipt;
use tracing::info;

use super::read_input;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::render;

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// OCR text file (`-` or omitted for stdin)
    pub input: Option<PathBuf>,

    /// Print items and skipped lines as JSON
    #[arg(long)]
    pub json: bool,

    /// Also list the lines that were dropped, and why
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

pub fn execute(args: &ParseArgs, config: &CliConfig) -> CliResult<String> {
    let text = read_input(args.input.as_deref())?;
    scan_text(&text, args, config)
}

fn scan_text(text: &str, args: &ParseArgs, config: &CliConfig) -> CliResult<String> {
    let scan = scan_receipt(text, &config.parser.parse_options());
    info!(
        items = scan.items.len(),
        skipped = scan.skipped.len(),
        "Receipt scanned"
    );

    if args.json {
        let mut json = if args.verbose {
            serde_json::to_string_pretty(&scan)?
        } else {
            serde_json::to_string_pretty(&scan.items)?
        };
        json.push('\n');
        return Ok(json);
    }

    let symbol = &config.display.currency_symbol;
    let mut out = render::candidates(&scan.items, symbol);
    if args.verbose {
        out.push_str(&render::skipped(&scan.skipped));
    }
    Ok(out)
}
