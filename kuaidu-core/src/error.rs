//! Error types for the reader core

use thiserror::Error;

/// Error type for settings handling and other fallible operations
#[derive(Debug, Error)]
pub enum ReaderError {
    /// Settings JSON could not be parsed
    #[error("Invalid settings JSON: {0}")]
    SettingsJson(#[from] serde_json::Error),

    /// Settings TOML could not be parsed
    #[error("Invalid settings TOML: {0}")]
    SettingsToml(#[from] toml::de::Error),

    /// Settings could not be serialized to TOML
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A setting is outside its allowed range
    #[error("Invalid value for {field}: {value} (expected {min}..={max})")]
    OutOfRange {
        /// Setting name as it appears in the stored JSON
        field: &'static str,
        /// Offending value
        value: i64,
        /// Smallest allowed value
        min: i64,
        /// Largest allowed value
        max: i64,
    },

    /// A setting has an unknown enumerated value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue {
        /// Setting name as it appears in the stored JSON
        field: &'static str,
        /// Offending value
        value: String,
    },

    /// Reading or writing a settings file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for reader operations
pub type Result<T> = std::result::Result<T, ReaderError>;
