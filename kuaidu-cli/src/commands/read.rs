//! Read command implementation
//!
//! Drives a [`Pacer`] on the system clock, sleeping until each tick is due
//! and printing chunks as they become visible.

use super::{init_logging, ChunkingFlags};
use crate::{error::CliError, input::FileReader, progress::ProgressReporter};
use anyhow::Result;
use clap::Args;
use kuaidu_core::{Clock, Pacer, PacerEvent, ReaderSettings, ReadingStats, SystemClock};
use std::{io::Write, path::PathBuf, thread, time::Duration};

/// Arguments for the read command
#[derive(Debug, Args)]
pub struct ReadArgs {
    /// Input file
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    #[command(flatten)]
    pub chunking: ChunkingFlags,

    /// Speed in chunks per minute (60-1000)
    #[arg(short, long, value_name = "N")]
    pub speed: Option<u32>,

    /// Scale dwell time by chunk length
    #[arg(long)]
    pub variability: bool,

    /// Do not dwell longer at sentence endings
    #[arg(long)]
    pub no_pause_at_breaks: bool,

    /// Show a progress bar instead of printing every chunk
    #[arg(short, long)]
    pub progress: bool,

    /// Suppress progress output and statistics
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl ReadArgs {
    /// Execute the read command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);

        let settings = self.settings()?;
        let text = FileReader::read_text(&self.input)?;

        let clock = SystemClock::new();
        let mut pacer = Pacer::with_clock(settings, clock);
        pacer.set_text(text);
        if pacer.chunk_count() == 0 {
            return Err(CliError::EmptyText(self.input.display().to_string()).into());
        }
        log::info!(
            "Reading {} chunks at {} per minute",
            pacer.chunk_count(),
            pacer.speed()
        );

        let mut progress = ProgressReporter::new(self.quiet || !self.progress);
        progress.init_reading(pacer.chunk_count() as u64);

        let stdout = std::io::stdout();
        pacer.start();
        while let Some(deadline) = pacer.next_deadline() {
            let wait = deadline.saturating_sub(clock.now_ms());
            if wait > 0 {
                thread::sleep(Duration::from_millis(wait));
            }

            match pacer.poll() {
                Some(PacerEvent::ChunkShown { index, chunk }) => {
                    if progress.is_active() {
                        progress.chunk_shown(index, &chunk.text);
                    } else {
                        let mut out = stdout.lock();
                        writeln!(out, "{}", chunk.text)?;
                        out.flush()?;
                    }
                }
                Some(PacerEvent::Finished) => break,
                None => {}
            }
        }
        progress.finish();

        let stats = pacer.stats();
        if !self.quiet {
            print_stats(&stats);
        }
        pacer.dispose();
        Ok(())
    }

    fn settings(&self) -> Result<ReaderSettings> {
        let mut settings = self.chunking.load_config()?.reader;
        if let Some(speed) = self.speed {
            settings.speed = speed;
        }
        if self.variability {
            settings.speed_variability = true;
        }
        if self.no_pause_at_breaks {
            settings.pause_at_breaks = false;
        }
        settings
            .validate()
            .map_err(|e| CliError::ConfigError(e.to_string()))?;
        Ok(settings)
    }
}

fn print_stats(stats: &ReadingStats) {
    println!("---");
    println!("Chunks read: {}/{}", stats.words_read, stats.total_chunks);
    println!("Pace: {} per minute", stats.current_wpm);
    println!("Time remaining: {}", stats.time_remaining_label());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(input: PathBuf) -> ReadArgs {
        ReadArgs {
            input,
            chunking: ChunkingFlags::default(),
            speed: Some(1000),
            variability: false,
            no_pause_at_breaks: true,
            progress: false,
            quiet: true,
            verbose: 0,
        }
    }

    #[test]
    fn test_settings_layering() {
        let mut read = args(PathBuf::from("unused.txt"));
        read.variability = true;
        let settings = read.settings().unwrap();
        assert_eq!(settings.speed, 1000);
        assert!(settings.speed_variability);
        assert!(!settings.pause_at_breaks);
    }

    #[test]
    fn test_speed_out_of_range() {
        let mut read = args(PathBuf::from("unused.txt"));
        read.speed = Some(5);
        let err = read.settings().unwrap_err();
        assert!(err.to_string().contains("speed"));
    }

    #[test]
    fn test_blank_file_is_an_error() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("blank.txt");
        std::fs::write(&path, "  \n\n").unwrap();

        let err = args(path).execute().unwrap_err();
        assert!(err.to_string().starts_with("Nothing to read in"));
    }

    #[test]
    fn test_reads_short_text() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("short.txt");
        std::fs::write(&path, "你好。").unwrap();

        assert!(args(path).execute().is_ok());
    }
}
