//! Generate config command implementation

use crate::config::CliConfig;
use anyhow::{Context, Result};
use clap::Args;
use std::{fs, path::PathBuf};

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        println!("Generating configuration...");
        println!("  Output file: {}", self.output.display());

        let content = CliConfig::default().to_toml()?;
        fs::write(&self.output, content)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the [reader] section to taste");
        println!("2. Validate your configuration:");
        println!("   kuaidu validate -c {}", self.output.display());
        println!("3. Use it:");
        println!("   kuaidu read -i input.txt -c {}", self.output.display());

        Ok(())
    }
}
