//! Typed error variants for the glyphlab-config crate.
//!
//! The settings loader itself never fails (a missing or malformed file falls
//! back to defaults), so these errors surface only from `Settings::save` and
//! the strict `Settings::read_from` helper.

use thiserror::Error;

/// Errors that can occur when reading or writing the settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading or writing the settings file.
    #[error("I/O error accessing settings: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file contained JSON that could not be parsed.
    #[error("JSON parse error in settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// No platform configuration directory could be determined.
    #[error("No configuration directory available on this platform")]
    NoConfigDir,

    /// A value could not be parsed from its textual form.
    #[error("Invalid {field}: '{value}'")]
    InvalidValue {
        /// Which kind of value was being parsed.
        field: &'static str,
        /// The rejected input.
        value: String,
    },
}
