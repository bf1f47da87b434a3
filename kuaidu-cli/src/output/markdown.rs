//! Markdown output formatter

use super::OutputFormatter;
use anyhow::Result;
use kuaidu_core::Chunk;
use std::io::Write;

/// Markdown formatter - outputs chunks as a numbered list per document
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    chunk_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            chunk_count: 0,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn start_document(&mut self, name: &str) -> Result<()> {
        writeln!(self.writer, "## {name}")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn format_chunk(&mut self, chunk: &Chunk, index: usize) -> Result<()> {
        self.chunk_count += 1;
        let marker = if chunk.break_point { " ⏎" } else { "" };
        writeln!(self.writer, "{}. {}{marker}", index + 1, chunk.text)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "---")?;
        writeln!(self.writer, "*Total chunks: {}*", self.chunk_count)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kuaidu_core::{chunk_text, ChunkingOptions};

    #[test]
    fn test_numbered_list_with_total() {
        let chunks = chunk_text("春眠不觉晓处处闻", &ChunkingOptions::default());
        let mut formatter = MarkdownFormatter::new(Vec::new());
        formatter.start_document("poem.txt").unwrap();
        for (i, chunk) in chunks.iter().enumerate() {
            formatter.format_chunk(chunk, i).unwrap();
        }
        formatter.finish().unwrap();

        let output = String::from_utf8(formatter.writer).unwrap();
        assert!(output.starts_with("## poem.txt\n\n1. 春眠不觉\n"));
        assert!(output.contains("2. 晓处处闻 ⏎"));
        assert!(output.ends_with("*Total chunks: 2*\n"));
    }
}
