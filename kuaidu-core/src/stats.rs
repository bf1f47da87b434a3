//! Reading statistics derived from pacer state

use serde::Serialize;

/// Snapshot of reading progress
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingStats {
    /// Chunks shown so far
    pub words_read: usize,
    /// Total chunks in the text
    pub total_chunks: usize,
    /// Observed pace in chunks per minute
    pub current_wpm: u32,
    /// Estimated minutes left
    pub time_remaining_minutes: f64,
    /// Milliseconds spent playing
    pub elapsed_ms: u64,
}

impl ReadingStats {
    /// Compute statistics from raw progress
    ///
    /// The remaining-time estimate divides by the faster of the observed
    /// and configured paces. Zero elapsed time yields zero for both rates.
    pub fn compute(position: usize, total: usize, elapsed_ms: u64, speed: u32) -> Self {
        if elapsed_ms == 0 {
            return Self {
                words_read: position,
                total_chunks: total,
                current_wpm: 0,
                time_remaining_minutes: 0.0,
                elapsed_ms,
            };
        }

        let minutes = elapsed_ms as f64 / 60_000.0;
        let current_wpm = (position as f64 / minutes).round() as u32;
        let rate = current_wpm.max(speed).max(1);
        let time_remaining_minutes = total.saturating_sub(position) as f64 / f64::from(rate);

        Self {
            words_read: position,
            total_chunks: total,
            current_wpm,
            time_remaining_minutes,
            elapsed_ms,
        }
    }

    /// Remaining time as `M:SS`
    pub fn time_remaining_label(&self) -> String {
        format_minutes(self.time_remaining_minutes)
    }

    /// Fraction of the text shown, in `[0, 1]`
    pub fn progress(&self) -> f64 {
        if self.total_chunks == 0 {
            0.0
        } else {
            self.words_read as f64 / self.total_chunks as f64
        }
    }
}

/// Format fractional minutes as `M:SS`
pub fn format_minutes(minutes: f64) -> String {
    let total_seconds = (minutes.max(0.0) * 60.0).round() as u64;
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}
