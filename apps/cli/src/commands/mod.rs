//! # Commands
//!
//! One module per subcommand. Each exposes its clap `Args` struct and an
//! `execute` function that returns the text for stdout, so the commands can
//! be tested without a terminal.
//!
//! ## Command Categories
//! - [`parse`]: OCR text → candidate items
//! - [`draft`]: OCR text → editable bill file
//! - [`split`]: bill file → who owes what

use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::CliResult;

pub mod draft;
pub mod parse;
pub mod split;

/// Reads a whole input: a file, or stdin for `None` and `-`.
pub(crate) fn read_input(path: Option<&Path>) -> CliResult<String> {
    match path {
        Some(path) if path != Path::new("-") => {
            debug!(?path, "Reading input file");
            Ok(std::fs::read_to_string(path)?)
        }
        _ => {
            debug!("Reading input from stdin");
            let mut contents = String::new();
            std::io::stdin().read_to_string(&mut contents)?;
            Ok(contents)
        }
    }
}
