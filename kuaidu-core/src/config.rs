//! Typed configuration consumed by the chunker and the pacer
//!
//! These are projections of [`ReaderSettings`](crate::settings::ReaderSettings)
//! built once when settings change, so the engine never re-interprets raw
//! mode strings.

use serde::{Deserialize, Serialize};

/// Slowest selectable pace, in chunks per minute
pub const MIN_SPEED: u32 = 60;
/// Fastest selectable pace, in chunks per minute
pub const MAX_SPEED: u32 = 1000;
/// Keyboard speed step
pub const SPEED_STEP: i32 = 30;
/// Smallest target chunk size
pub const MIN_CHUNK_SIZE: usize = 1;
/// Largest target chunk size
pub const MAX_CHUNK_SIZE: usize = 10;

/// Extra dwell applied on page starts and at break points
pub const DWELL_FACTOR: f64 = 1.5;
/// Lower bound of the length-based speed variability factor
pub const MIN_VARIABILITY_FACTOR: f64 = 0.5;
/// Upper bound of the length-based speed variability factor
pub const MAX_VARIABILITY_FACTOR: f64 = 2.0;

/// Stopwords shipped with the default settings
pub const DEFAULT_STOPWORDS: &[&str] = &["的", "了", "着", "和", "与", "及", "或"];

/// How the chunk sequence is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum DisplayMode {
    /// One chunk at a time in a fixed spot
    #[default]
    Serial,
    /// Full text with the current chunk highlighted, scrolling
    Scroll {
        /// Lines of context kept around the current line
        context_lines: usize,
    },
    /// Full text with the current chunk highlighted, paginated
    Page {
        /// Chunks per page
        page_size: usize,
    },
}

impl DisplayMode {
    /// Whether trailing punctuation may be hidden in this mode
    ///
    /// Page view shows the whole page of text, so dropping punctuation would
    /// make the highlighted text disagree with its surroundings.
    pub fn allows_hidden_punctuation(&self) -> bool {
        !matches!(self, DisplayMode::Page { .. })
    }

    /// Page size for paginated display
    pub fn page_size(&self) -> Option<usize> {
        match self {
            DisplayMode::Page { page_size } => Some(*page_size),
            _ => None,
        }
    }

    /// Short name used by the CLI and logs
    pub fn name(&self) -> &'static str {
        match self {
            DisplayMode::Serial => "serial",
            DisplayMode::Scroll { .. } => "scroll",
            DisplayMode::Page { .. } => "page",
        }
    }
}

/// Options for [`Chunker`](crate::chunker::Chunker)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkingOptions {
    /// Nominal characters per chunk
    pub target_size: usize,
    /// Allowed deviation from `target_size` when looking for a boundary
    pub flexible_range: usize,
    /// Force a boundary at the first sentence ending inside the window
    pub sentence_break: bool,
    /// Drop trailing punctuation from the displayed text
    pub hide_end_punctuation: bool,
    /// Elide stopwords before chunking
    pub skip_stopwords: bool,
    /// Stopword entries, single or multi character
    pub stopwords: Vec<String>,
    /// Presentation mode, only consulted for punctuation hiding
    pub mode: DisplayMode,
}

impl Default for ChunkingOptions {
    fn default() -> Self {
        Self {
            target_size: 4,
            flexible_range: 1,
            sentence_break: true,
            hide_end_punctuation: false,
            skip_stopwords: false,
            stopwords: DEFAULT_STOPWORDS.iter().map(|s| s.to_string()).collect(),
            mode: DisplayMode::Serial,
        }
    }
}

impl ChunkingOptions {
    /// Fixed-size chunking: no tolerance window, no sentence override
    pub fn fixed(size: usize) -> Self {
        Self {
            target_size: size,
            flexible_range: 0,
            sentence_break: false,
            ..Default::default()
        }
    }

    /// Whether trailing punctuation is actually hidden
    pub fn hides_punctuation(&self) -> bool {
        self.hide_end_punctuation && self.mode.allows_hidden_punctuation()
    }

    /// Effective target size, never zero
    pub fn target(&self) -> usize {
        self.target_size.max(1)
    }

    /// Body length window `(min, max)` around the target
    pub fn window(&self) -> (usize, usize) {
        let target = self.target();
        let min = target.saturating_sub(self.flexible_range).max(1);
        (min, target + self.flexible_range)
    }
}

/// Options for the pacer's interval computation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PacingConfig {
    /// Chunks per minute
    pub speed: u32,
    /// Target chunk size, the reference length for speed variability
    pub target_chunk_size: usize,
    /// Scale the interval by chunk length
    pub speed_variability: bool,
    /// Dwell longer on chunks that end a sentence or paragraph
    pub pause_at_breaks: bool,
    /// Presentation mode, consulted for page-start dwell
    pub mode: DisplayMode,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            speed: 300,
            target_chunk_size: 4,
            speed_variability: false,
            pause_at_breaks: true,
            mode: DisplayMode::Serial,
        }
    }
}

impl PacingConfig {
    /// Base interval in milliseconds, before any multiplier
    pub fn base_interval_ms(&self) -> f64 {
        60_000.0 / f64::from(self.speed.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_mode_never_hides_punctuation() {
        let options = ChunkingOptions {
            hide_end_punctuation: true,
            mode: DisplayMode::Page { page_size: 5 },
            ..Default::default()
        };
        assert!(!options.hides_punctuation());
    }

    #[test]
    fn test_serial_and_scroll_hide_punctuation() {
        for mode in [DisplayMode::Serial, DisplayMode::Scroll { context_lines: 2 }] {
            let options = ChunkingOptions {
                hide_end_punctuation: true,
                mode,
                ..Default::default()
            };
            assert!(options.hides_punctuation(), "mode {}", mode.name());
        }
    }

    #[test]
    fn test_window_clamps_lower_bound() {
        let options = ChunkingOptions {
            target_size: 2,
            flexible_range: 3,
            ..Default::default()
        };
        assert_eq!(options.window(), (1, 5));

        let zero = ChunkingOptions {
            target_size: 0,
            flexible_range: 0,
            ..Default::default()
        };
        assert_eq!(zero.window(), (1, 1));
    }

    #[test]
    fn test_fixed_preset() {
        let options = ChunkingOptions::fixed(3);
        assert_eq!(options.window(), (3, 3));
        assert!(!options.sentence_break);
    }

    #[test]
    fn test_base_interval() {
        let pacing = PacingConfig {
            speed: 300,
            ..Default::default()
        };
        assert_eq!(pacing.base_interval_ms(), 200.0);
    }
}
