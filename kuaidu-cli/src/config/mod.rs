//! Configuration module

use crate::{commands::OutputFormat, error::CliError};
use anyhow::{Context, Result};
use clap::ValueEnum;
use kuaidu_core::ReaderSettings;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// Reader settings, the same record the engine persists
    #[serde(default)]
    pub reader: ReaderSettings,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Performance configuration
    #[serde(default)]
    pub performance: PerformanceConfig,
}

/// Output-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub default_format: String,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
            pretty_json: true,
        }
    }
}

/// Performance-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Number of worker threads (0 = auto)
    pub worker_threads: usize,
}

impl CliConfig {
    /// Load a configuration file
    ///
    /// `.json` files hold a bare settings record as a front end would store
    /// it; anything else is read as a TOML document with `[reader]`,
    /// `[output]` and `[performance]` sections.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(CliError::FileNotFound(path.display().to_string()).into());
        }

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config = if is_json {
            let reader = ReaderSettings::load_file(path)
                .map_err(|e| CliError::ConfigError(e.to_string()))
                .with_context(|| format!("Failed to load settings: {}", path.display()))?;
            Self {
                reader,
                ..Default::default()
            }
        } else {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            toml::from_str(&content)
                .map_err(|e| CliError::ConfigError(e.to_string()))
                .with_context(|| format!("Failed to parse config: {}", path.display()))?
        };

        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Render as a commented TOML document
    pub fn to_toml(&self) -> Result<String> {
        let body = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        Ok(format!(
            "# kuaidu configuration\n#\n# [reader] uses the same keys as the stored settings record.\n\n{body}"
        ))
    }

    /// Check ranges and enumerated values
    pub fn validate(&self) -> Result<()> {
        self.reader
            .validate()
            .map_err(|e| CliError::ConfigError(e.to_string()))?;
        self.output_format()?;
        Ok(())
    }

    /// The configured default output format
    pub fn output_format(&self) -> Result<OutputFormat> {
        OutputFormat::from_str(&self.output.default_format, true).map_err(|_| {
            CliError::ConfigError(format!(
                "unknown output format '{}'",
                self.output.default_format
            ))
            .into()
        })
    }

    /// Worker threads to use, resolving 0 to the CPU count
    pub fn worker_threads(&self) -> usize {
        match self.performance.worker_threads {
            0 => num_cpus::get(),
            n => n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    #[test]
    fn test_default_round_trips_through_toml() {
        let config = CliConfig::default();
        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("[reader]"));
        assert!(rendered.contains("chunkSize = 4"));

        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "{rendered}").unwrap();
        assert_eq!(CliConfig::load(file.path()).unwrap(), config);
    }

    #[test]
    fn test_partial_toml_sections() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            "[reader]\nspeed = 450\n\n[output]\ndefault_format = \"json\"\n"
        )
        .unwrap();

        let config = CliConfig::load(file.path()).unwrap();
        assert_eq!(config.reader.speed, 450);
        assert_eq!(config.reader.chunk_size, 4);
        assert_eq!(config.output_format().unwrap(), OutputFormat::Json);
        assert!(config.output.pretty_json);
    }

    #[test]
    fn test_json_settings_record() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"chunkSize": 3, "skipStopwords": true}}"#).unwrap();

        let config = CliConfig::load(file.path()).unwrap();
        assert_eq!(config.reader.chunk_size, 3);
        assert!(config.reader.skip_stopwords);
    }

    #[test]
    fn test_missing_file() {
        let err = CliConfig::load(Path::new("/nonexistent/kuaidu.toml")).unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn test_malformed_toml() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[reader\nspeed = ").unwrap();
        assert!(CliConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_format() {
        let mut config = CliConfig::default();
        config.output.default_format = "yaml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_worker_threads_auto() {
        let config = CliConfig::default();
        assert!(config.worker_threads() >= 1);
    }
}
