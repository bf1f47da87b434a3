//! Output formatting module

use crate::commands::OutputFormat;
use anyhow::Result;
use kuaidu_core::Chunk;
use std::io::Write;

/// Trait for writing a chunk sequence in some format
pub trait OutputFormatter: Send + Sync {
    /// Begin the chunks of one input document
    fn start_document(&mut self, _name: &str) -> Result<()> {
        Ok(())
    }

    /// Write a single chunk
    fn format_chunk(&mut self, chunk: &Chunk, index: usize) -> Result<()>;

    /// Flush any buffered output
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Build the formatter for `format` writing to `writer`
pub fn create_formatter(
    format: OutputFormat,
    writer: Box<dyn Write + Send + Sync>,
    pretty_json: bool,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer).pretty(pretty_json)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
    }
}
