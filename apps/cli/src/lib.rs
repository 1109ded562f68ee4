//! # splitbill CLI Library
//!
//! Argument parsing, configuration and output for the `splitbill` binary.
//! All bill logic lives in `splitbill-core`.
//!
//! ## Module Organization
//! ```text
//! splitbill_cli/
//! ├── lib.rs          ◄─── You are here (arguments, logging, dispatch)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Shared input handling
//! │   ├── parse.rs    ◄─── OCR text → candidates
//! │   ├── draft.rs    ◄─── OCR text → bill file
//! │   └── split.rs    ◄─── bill file → split report
//! ├── bill_file.rs    ◄─── TOML bill format
//! ├── config.rs       ◄─── splitbill.toml + environment
//! ├── render.rs       ◄─── tables and JSON payloads
//! └── error.rs        ◄─── CliError and exit codes
//! ```
//!
//! ## Typical Session
//! ```text
//! $ ocr receipt.jpg > receipt.txt          (any OCR tool)
//! $ splitbill draft receipt.txt --people Alice,Bob -o bill.toml
//! $ $EDITOR bill.toml                      (fix items, fill in shared_by)
//! $ splitbill split bill.toml
//! ```
//!
//! Results go to stdout. Logs go to stderr and are filtered with `RUST_LOG`.

pub mod bill_file;
pub mod commands;
pub mod config;
pub mod error;
pub mod render;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use commands::{draft::DraftArgs, parse::ParseArgs, split::SplitArgs};
use config::CliConfig;
use error::CliResult;

#[derive(Debug, Parser)]
#[command(name = "splitbill")]
#[command(about = "Split a restaurant bill from OCR'd receipt text")]
#[command(version)]
pub struct Cli {
    /// Config file (default: splitbill.toml in the platform config dir)
    #[arg(long, global = true, env = "SPLITBILL_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the items the parser finds in OCR text
    #[command(after_help = "\
Examples:
  splitbill parse receipt.txt
  tesseract receipt.jpg - | splitbill parse --verbose")]
    Parse(ParseArgs),

    /// Write an editable bill file pre-filled from OCR text
    #[command(after_help = "\
Examples:
  splitbill draft receipt.txt --people Alice,Bob -o bill.toml
  splitbill draft receipt.txt --party-size 4 > bill.toml")]
    Draft(DraftArgs),

    /// Confirm a bill file and show who owes what
    #[command(after_help = "\
Examples:
  splitbill split bill.toml
  splitbill split bill.toml --json")]
    Split(SplitArgs),
}

/// Runs the `splitbill` binary.
///
/// ## Startup Sequence
/// 1. Parse arguments
/// 2. Initialize tracing (stderr)
/// 3. Load configuration
/// 4. Run the command and print its output
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match execute(&cli) {
        Ok(output) => {
            let mut stdout = std::io::stdout().lock();
            if let Err(e) = stdout.write_all(output.as_bytes()).and_then(|_| stdout.flush()) {
                // A closed pipe (`splitbill parse | head`) is not a failure.
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    eprintln!("error: {}", e);
                    return ExitCode::from(error::EXIT_FAILURE);
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn execute(cli: &Cli) -> CliResult<String> {
    let config = CliConfig::load(cli.config.clone())?;
    debug!(?config, "Configuration loaded");

    match &cli.command {
        Command::Parse(args) => commands::parse::execute(args, &config),
        Command::Draft(args) => commands::draft::execute(args, &config),
        Command::Split(args) => commands::split::execute(args, &config),
    }
}

/// Initializes the tracing subscriber for logging.
///
/// Respects `RUST_LOG`, defaulting to `warn,splitbill=info`. Writes to
/// stderr so stdout stays clean for JSON and bill files.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,splitbill=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
