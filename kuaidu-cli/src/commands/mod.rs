//! CLI command implementations

use crate::{config::CliConfig, error::CliError};
use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod chunk;
pub mod generate_config;
pub mod read;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Split text files into reading chunks
    Chunk(chunk::ChunkArgs),

    /// Play a text file chunk by chunk at the configured pace
    Read(read::ReadArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },

    /// Write a configuration file with the default settings
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// Check a configuration file
    Validate(validate::ValidateArgs),
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List display modes
    Modes,

    /// List available output formats
    Formats,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text with one chunk per line
    Text,
    /// JSON array of chunks with source offsets
    Json,
    /// Markdown numbered list
    Markdown,
}

/// Display modes selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// One chunk at a time
    Serial,
    /// Highlighted chunk in scrolling text
    Scroll,
    /// Highlighted chunk in paginated text
    Page,
}

impl ModeArg {
    fn name(self) -> &'static str {
        match self {
            ModeArg::Serial => "serial",
            ModeArg::Scroll => "scroll",
            ModeArg::Page => "page",
        }
    }
}

/// Chunking flags shared by `chunk` and `read`
#[derive(Debug, Default, Args)]
pub struct ChunkingFlags {
    /// Target characters per chunk (1-10)
    #[arg(long, value_name = "N")]
    pub chunk_size: Option<usize>,

    /// Allowed deviation from the chunk size (0-3)
    #[arg(long, value_name = "N")]
    pub flexible_range: Option<usize>,

    /// Do not force chunk boundaries at sentence endings
    #[arg(long)]
    pub no_sentence_break: bool,

    /// Hide trailing punctuation (ignored in page mode)
    #[arg(long)]
    pub hide_punctuation: bool,

    /// Drop stopwords before chunking
    #[arg(long)]
    pub skip_stopwords: bool,

    /// Display mode
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Configuration file (TOML, or JSON settings record)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl ChunkingFlags {
    /// Load the configuration file, if any, and layer the flags over it
    pub fn load_config(&self) -> Result<CliConfig> {
        let mut config = match &self.config {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };

        let reader = &mut config.reader;
        if let Some(size) = self.chunk_size {
            reader.chunk_size = size;
        }
        if let Some(range) = self.flexible_range {
            reader.flexible_range = range;
        }
        if self.no_sentence_break {
            reader.sentence_break = false;
        }
        if self.hide_punctuation {
            reader.hide_end_punctuation = true;
        }
        if self.skip_stopwords {
            reader.skip_stopwords = true;
        }
        if let Some(mode) = self.mode {
            reader.set_mode_name(mode.name())?;
        }

        reader
            .validate()
            .map_err(|e| CliError::ConfigError(e.to_string()))?;

        Ok(config)
    }
}

/// Initialize logging based on verbosity level
pub fn init_logging(verbose: u8, quiet: bool) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    if !quiet {
        // A logger may already be installed when commands run in-process.
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .try_init();
    }
}

/// Print the display modes
pub fn list_modes() {
    println!("Display modes:");
    println!("  serial  - one chunk at a time in a fixed spot");
    println!("  scroll  - full text with the current chunk highlighted, scrolling");
    println!("  page    - full text with the current chunk highlighted, paginated");
}

/// Print the output formats
pub fn list_formats() {
    println!("Output formats:");
    println!("  text      - one chunk per line");
    println!("  json      - JSON array with offsets and break points");
    println!("  markdown  - numbered Markdown list");
}
