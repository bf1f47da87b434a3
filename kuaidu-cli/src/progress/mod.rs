//! Progress reporting module

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress reporter for chunking files and for read-through playback
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    quiet: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new(quiet: bool) -> Self {
        Self {
            progress_bar: None,
            quiet,
        }
    }

    /// Initialize progress bar for file processing
    pub fn init_files(&mut self, total_files: u64) {
        self.init(
            total_files,
            "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} files {msg}",
        );
    }

    /// Initialize progress bar for reading through a chunk sequence
    pub fn init_reading(&mut self, total_chunks: u64) {
        self.init(
            total_chunks,
            "[{elapsed_precise}] {bar:40.green/white} {pos}/{len} {msg}",
        );
    }

    fn init(&mut self, total: u64, template: &str) {
        if self.quiet {
            return;
        }

        let pb = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template(template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-");
        pb.set_style(style);
        pb.enable_steady_tick(Duration::from_millis(100));

        self.progress_bar = Some(pb);
    }

    /// Update progress for a completed file
    pub fn file_completed(&self, filename: &str) {
        if let Some(pb) = &self.progress_bar {
            pb.set_message(format!("Chunked: {}", filename));
            pb.inc(1);
        }
    }

    /// Show the chunk that just became visible
    pub fn chunk_shown(&self, index: usize, text: &str) {
        if let Some(pb) = &self.progress_bar {
            pb.set_position(index as u64 + 1);
            pb.set_message(text.to_string());
        }
    }

    /// Whether a bar is being drawn
    pub fn is_active(&self) -> bool {
        self.progress_bar.is_some()
    }

    /// Finish progress reporting
    pub fn finish(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message("Complete");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_reporter_draws_nothing() {
        let mut reporter = ProgressReporter::new(true);
        reporter.init_files(3);
        reporter.file_completed("a.txt");
        reporter.finish();
        assert!(!reporter.is_active());
    }

    #[test]
    fn test_reading_bar_tracks_position() {
        let mut reporter = ProgressReporter::new(false);
        reporter.init_reading(5);
        reporter.chunk_shown(2, "明天也不错！");
        let position = reporter.progress_bar.as_ref().map(|pb| pb.position());
        assert_eq!(position, Some(3));
        reporter.finish();
    }
}
