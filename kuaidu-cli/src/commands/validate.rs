//! Validate command implementation

use crate::config::CliConfig;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the configuration file to validate
    #[arg(short, long, value_name = "FILE", required = true)]
    pub config: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating configuration: {}", self.config.display());

        match CliConfig::load(&self.config).and_then(|config| config.validate().map(|_| config)) {
            Ok(config) => {
                let reader = &config.reader;
                println!("✓ Configuration is valid!");
                println!("  Chunk size: {} ± {}", reader.chunk_size, reader.flexible_range);
                println!("  Speed: {} per minute", reader.speed);
                println!("  Mode: {}", reader.display_mode().name());
                Ok(())
            }
            Err(e) => {
                println!("✗ Configuration is invalid!");
                println!("  Error: {e:#}");
                Err(anyhow::anyhow!("Validation failed: {e:#}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_validate_valid_config() {
        let mut temp_file = Builder::new().suffix(".toml").tempfile().unwrap();
        write!(temp_file, "[reader]\nchunkSize = 5\nspeed = 600\n").unwrap();

        let args = ValidateArgs {
            config: temp_file.path().to_path_buf(),
        };
        assert!(args.execute().is_ok());
    }

    #[test]
    fn test_validate_out_of_range() {
        let mut temp_file = Builder::new().suffix(".toml").tempfile().unwrap();
        write!(temp_file, "[reader]\npageSize = 20\n").unwrap();

        let args = ValidateArgs {
            config: temp_file.path().to_path_buf(),
        };
        let err = args.execute().unwrap_err();
        assert!(err.to_string().contains("pageSize"));
    }

    #[test]
    fn test_validate_json_record() {
        let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
        write!(temp_file, r#"{{"readingMode": "sideways"}}"#).unwrap();

        let args = ValidateArgs {
            config: temp_file.path().to_path_buf(),
        };
        assert!(args.execute().is_err());
    }
}
