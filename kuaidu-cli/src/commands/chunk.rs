//! Chunk command implementation

use super::{init_logging, ChunkingFlags, OutputFormat};
use crate::{
    input::{resolve_patterns, FileReader},
    output::create_formatter,
    progress::ProgressReporter,
};
use anyhow::{Context, Result};
use clap::Args;
use kuaidu_core::{Chunk, Chunker};
use rayon::prelude::*;
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

/// Arguments for the chunk command
#[derive(Debug, Args)]
pub struct ChunkArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (default: from config, else text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(flatten)]
    pub chunking: ChunkingFlags,

    /// Number of worker threads (default: CPU count)
    #[arg(short, long, value_name = "N")]
    pub threads: Option<usize>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl ChunkArgs {
    /// Execute the chunk command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);

        log::info!("Starting chunking");
        log::debug!("Arguments: {:?}", self);

        let config = self.chunking.load_config()?;
        let format = match self.format {
            Some(format) => format,
            None => config.output_format()?,
        };
        let threads = self
            .threads
            .filter(|&n| n > 0)
            .unwrap_or_else(|| config.worker_threads());

        let files = resolve_patterns(&self.input)?;
        log::info!("Found {} file(s) to chunk", files.len());

        let chunker = Chunker::new(config.reader.chunking_options());
        let mut progress = ProgressReporter::new(self.quiet || self.output.is_none());
        progress.init_files(files.len() as u64);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .context("Failed to build worker pool")?;

        let results: Vec<Result<Vec<Chunk>>> = pool.install(|| {
            files
                .par_iter()
                .map(|path| {
                    let text = FileReader::read_text(path)?;
                    log::debug!(
                        "Chunking {} ({} bytes)",
                        path.display(),
                        FileReader::file_size(path).unwrap_or(text.len() as u64)
                    );
                    let chunks = chunker.chunk_text(&text);
                    progress.file_completed(&path.display().to_string());
                    Ok(chunks)
                })
                .collect()
        });

        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => Box::new(BufWriter::new(
                File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?,
            )),
            None => Box::new(io::stdout()),
        };
        let mut formatter = create_formatter(format, writer, config.output.pretty_json);

        let mut total = 0;
        for (path, result) in files.iter().zip(results) {
            let chunks = result?;
            formatter.start_document(&path.display().to_string())?;
            for (index, chunk) in chunks.iter().enumerate() {
                formatter.format_chunk(chunk, index)?;
            }
            total += chunks.len();
        }
        formatter.finish()?;
        progress.finish();

        log::info!("Wrote {} chunks from {} file(s)", total, files.len());
        Ok(())
    }
}
