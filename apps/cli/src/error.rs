//! # CLI Errors
//!
//! Everything that can go wrong between the command line and the core.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Error Flow                                     │
//! │                                                                         │
//! │  ┌─────────────┐    ┌──────────────┐    ┌─────────────┐    ┌────────┐  │
//! │  │ SplitError  │───►│   CliError   │───►│  run()      │───►│ stderr │  │
//! │  │ (core)      │    │  (this file) │    │  exit code  │    │        │  │
//! │  └─────────────┘    └──────────────┘    └─────────────┘    └────────┘  │
//! │                            ▲                                            │
//! │   io, toml, serde_json ────┘                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use splitbill_core::{SplitError, ValidationError};
use thiserror::Error;

/// Process exit code for I/O and serialization failures.
pub const EXIT_FAILURE: u8 = 1;
/// Process exit code for a bad config file or environment override.
pub const EXIT_CONFIG: u8 = 2;
/// Process exit code for a bill that does not pass validation.
pub const EXIT_INVALID_BILL: u8 = 3;

/// Errors surfaced by the `splitbill` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading or writing a file (or stdin/stdout) failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A TOML file could not be parsed.
    #[error("Invalid TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A bill could not be written as TOML.
    #[error("Failed to write TOML: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    /// JSON output could not be produced.
    #[error("Failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// `--config` pointed at a file that does not exist.
    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// Refused to overwrite an existing file.
    #[error("{} already exists (use --force to overwrite)", .0.display())]
    OutputExists(PathBuf),

    /// A bill file row could not be turned into a draft row.
    #[error("Item #{row}: {source}")]
    BillRow {
        row: usize,
        #[source]
        source: ValidationError,
    },

    /// The core rejected the bill.
    #[error(transparent)]
    Split(#[from] SplitError),
}

impl CliError {
    /// Maps the error to the process exit code.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::InvalidConfig(_) | CliError::ConfigNotFound(_) => EXIT_CONFIG,
            CliError::BillRow { .. } | CliError::Split(_) => EXIT_INVALID_BILL,
            _ => EXIT_FAILURE,
        }
    }
}

/// Convenience type alias for Results with CliError.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let err = CliError::InvalidConfig("bad".into());
        assert_eq!(err.exit_code(), EXIT_CONFIG);

        let err: CliError = SplitError::from(ValidationError::Required {
            field: "name".into(),
        })
        .into();
        assert_eq!(err.exit_code(), EXIT_INVALID_BILL);

        let err: CliError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.exit_code(), EXIT_FAILURE);
    }

    #[test]
    fn test_bill_row_message() {
        let err = CliError::BillRow {
            row: 2,
            source: ValidationError::InvalidFormat {
                field: "price".into(),
                reason: "expected digits".into(),
            },
        };
        assert_eq!(
            err.to_string(),
            "Item #2: price has invalid format: expected digits"
        );
    }
}
