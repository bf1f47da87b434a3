//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use kuaidu_core::Chunk;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// JSON formatter - collects chunks and writes one array at the end
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    document: Option<String>,
    chunks: Vec<ChunkData>,
}

/// Serialized form of one chunk
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkData {
    /// Input document the chunk came from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    /// Position in the document's chunk sequence
    pub index: usize,
    /// Displayed text
    pub text: String,
    /// Trailing punctuation, shown or hidden
    pub punctuation: Option<char>,
    /// Ends a sentence, paragraph or line
    pub break_point: bool,
    /// Byte offset of the chunk in the document
    pub offset: usize,
    /// Byte length of the source span
    pub length: usize,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: true,
            document: None,
            chunks: Vec::new(),
        }
    }

    /// Choose between pretty and compact output
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn start_document(&mut self, name: &str) -> Result<()> {
        self.document = Some(name.to_string());
        Ok(())
    }

    fn format_chunk(&mut self, chunk: &Chunk, index: usize) -> Result<()> {
        self.chunks.push(ChunkData {
            document: self.document.clone(),
            index,
            text: chunk.text.clone(),
            punctuation: chunk.punctuation,
            break_point: chunk.break_point,
            offset: chunk.source.start,
            length: chunk.source.len(),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.chunks)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.chunks)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
