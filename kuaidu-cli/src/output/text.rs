//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use kuaidu_core::Chunk;
use std::io::Write;

/// Text formatter - one chunk per line, blank line between documents
pub struct TextFormatter<W: Write> {
    writer: W,
    documents: usize,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            documents: 0,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn start_document(&mut self, _name: &str) -> Result<()> {
        if self.documents > 0 {
            writeln!(self.writer)?;
        }
        self.documents += 1;
        Ok(())
    }

    fn format_chunk(&mut self, chunk: &Chunk, _index: usize) -> Result<()> {
        writeln!(self.writer, "{}", chunk.text)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kuaidu_core::{chunk_text, ChunkingOptions};

    #[test]
    fn test_one_chunk_per_line() {
        let chunks = chunk_text("今天天气很好。明天也不错！", &ChunkingOptions::default());
        let mut formatter = TextFormatter::new(Vec::new());
        formatter.start_document("a.txt").unwrap();
        for (i, chunk) in chunks.iter().enumerate() {
            formatter.format_chunk(chunk, i).unwrap();
        }
        formatter.start_document("b.txt").unwrap();
        formatter.format_chunk(&chunks[0], 0).unwrap();
        formatter.finish().unwrap();

        let output = String::from_utf8(formatter.writer).unwrap();
        assert_eq!(output, "今天天气很好。\n明天也不错！\n\n今天天气很好。\n");
    }
}
