//! # CLI Configuration
//!
//! Settings for parsing and display.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SPLITBILL_CURRENCY_SYMBOL=€                                        │
//! │     SPLITBILL_PARTY_SIZE=4                                             │
//! │     SPLITBILL_REPAIR_DECIMALS=false                                    │
//! │                                                                         │
//! │  2. TOML Config File (--config PATH, or the platform config dir)       │
//! │     ~/.config/splitbill/splitbill.toml (Linux)                         │
//! │     ~/Library/Application Support/app.splitbill.splitbill/... (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # splitbill.toml
//! [parser]
//! repair_split_decimals = true   # "Coffee 3 50" -> 3.50
//!
//! [display]
//! currency_symbol = "$"
//! default_party_size = 2         # used by `draft` when --people is absent
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use splitbill_core::ParseOptions;
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

/// Largest party `draft` will generate placeholder names for.
pub const MAX_PARTY_SIZE: usize = 100;

const CONFIG_FILE_NAME: &str = "splitbill.toml";

// =============================================================================
// Parser Settings
// =============================================================================

/// Receipt parser settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserSettings {
    /// Rejoin prices whose decimal point the OCR read as a space.
    #[serde(default = "default_true")]
    pub repair_split_decimals: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ParserSettings {
    fn default() -> Self {
        ParserSettings {
            repair_split_decimals: default_true(),
        }
    }
}

impl ParserSettings {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            repair_split_decimals: self.repair_split_decimals,
        }
    }
}

// =============================================================================
// Display Settings
// =============================================================================

/// Output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Prefix for every amount printed in text mode. JSON output is
    /// always plain cents.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Number of "Person N" placeholders `draft` writes when no names are
    /// given.
    #[serde(default = "default_party_size")]
    pub default_party_size: usize,
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_party_size() -> usize {
    2
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: default_currency_symbol(),
            default_party_size: default_party_size(),
        }
    }
}

// =============================================================================
// CLI Configuration
// =============================================================================

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub parser: ParserSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl CliConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`splitbill.toml`)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` must exist. The platform default is
    /// optional.
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        let mut config = match config_path {
            Some(path) if !path.exists() => return Err(CliError::ConfigNotFound(path)),
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                path => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    fn from_file(path: &Path) -> CliResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        let symbol = &self.display.currency_symbol;
        if symbol.chars().any(|c| c.is_ascii_digit() || c.is_whitespace()) {
            return Err(CliError::InvalidConfig(format!(
                "currency_symbol must not contain digits or spaces, got '{}'",
                symbol
            )));
        }

        let size = self.display.default_party_size;
        if size == 0 || size > MAX_PARTY_SIZE {
            return Err(CliError::InvalidConfig(format!(
                "default_party_size must be between 1 and {}, got {}",
                MAX_PARTY_SIZE, size
            )));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(symbol) = lookup("SPLITBILL_CURRENCY_SYMBOL") {
            debug!(symbol = %symbol, "Overriding currency symbol from environment");
            self.display.currency_symbol = symbol;
        }

        if let Some(size) = lookup("SPLITBILL_PARTY_SIZE") {
            match size.trim().parse::<usize>() {
                Ok(n) => self.display.default_party_size = n,
                Err(_) => warn!(value = %size, "Ignoring non-numeric SPLITBILL_PARTY_SIZE"),
            }
        }

        if let Some(flag) = lookup("SPLITBILL_REPAIR_DECIMALS") {
            match flag.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.parser.repair_split_decimals = true,
                "0" | "false" | "no" | "off" => self.parser.repair_split_decimals = false,
                _ => warn!(value = %flag, "Unknown SPLITBILL_REPAIR_DECIMALS value"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("app", "splitbill", "splitbill")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
