//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// File not found or inaccessible
    FileNotFound(String),
    /// Invalid file pattern
    InvalidPattern(String),
    /// Configuration error
    ConfigError(String),
    /// The input produced no chunks to read
    EmptyText(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::EmptyText(path) => write!(f, "Nothing to read in: {path}"),
        }
    }
}

impl std::error::Error for CliError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_error_display() {
        let error = CliError::FileNotFound("test.txt".to_string());
        assert_eq!(error.to_string(), "File not found: test.txt");
    }

    #[test]
    fn test_config_error_display() {
        let error = CliError::ConfigError("chunkSize out of range".to_string());
        assert_eq!(
            error.to_string(),
            "Configuration error: chunkSize out of range"
        );
    }

    #[test]
    fn test_empty_text_display() {
        let error = CliError::EmptyText("blank.txt".to_string());
        assert_eq!(error.to_string(), "Nothing to read in: blank.txt");
    }

    #[test]
    fn test_error_with_unicode_path() {
        let error = CliError::InvalidPattern("文章/[*.txt".to_string());
        assert_eq!(error.to_string(), "Invalid file pattern: 文章/[*.txt");

        let wrapped: anyhow::Error = error.into();
        assert!(wrapped.downcast_ref::<CliError>().is_some());
    }
}
