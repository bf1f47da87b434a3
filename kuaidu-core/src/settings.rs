//! Persisted reader settings
//!
//! [`ReaderSettings`] is the record a front end keeps in its key-value store
//! under [`SETTINGS_KEY`]. It is serialized with camelCase keys, and every
//! field falls back to its default when missing. The engine never reads it
//! directly: [`ReaderSettings::chunking_options`] and
//! [`ReaderSettings::pacing`] project it into typed configuration once.

use crate::{
    config::{
        ChunkingOptions, DisplayMode, PacingConfig, DEFAULT_STOPWORDS, MAX_CHUNK_SIZE, MAX_SPEED,
        MIN_CHUNK_SIZE, MIN_SPEED,
    },
    error::{ReaderError, Result},
};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Key under which settings are stored
pub const SETTINGS_KEY: &str = "speed-reading-settings";

const FLEXIBLE_RANGE_LIMITS: (usize, usize) = (0, 3);
const CONTEXT_LINES_LIMITS: (usize, usize) = (0, 5);
const PAGE_SIZE_LIMITS: (usize, usize) = (3, 10);

/// Presentation family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingMode {
    /// One chunk at a time
    #[default]
    Serial,
    /// Whole text with the current chunk highlighted
    Highlight,
}

/// How highlight mode moves through the text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightStyle {
    /// Continuous scrolling
    #[default]
    Scroll,
    /// Fixed pages of chunks
    Page,
}

/// All user-facing reader settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReaderSettings {
    /// Target characters per chunk
    pub chunk_size: usize,
    /// Chunks per minute
    pub speed: u32,
    /// Tolerance around the chunk size
    pub flexible_range: usize,
    /// Break chunks at sentence endings
    pub sentence_break: bool,
    /// Hide trailing punctuation (ignored in page view)
    pub hide_end_punctuation: bool,
    /// Elide stopwords
    pub skip_stopwords: bool,
    /// Stopword list
    pub stopwords: Vec<String>,
    /// Serial or highlight presentation
    pub reading_mode: ReadingMode,
    /// Scroll or page, for highlight presentation
    pub highlight_style: HighlightStyle,
    /// Context lines around the current line when scrolling
    pub context_lines: usize,
    /// Chunks per page
    pub page_size: usize,
    /// Scale dwell time by chunk length
    pub speed_variability: bool,
    /// Dwell longer at sentence and paragraph ends
    pub pause_at_breaks: bool,
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            chunk_size: 4,
            speed: 300,
            flexible_range: 1,
            sentence_break: true,
            hide_end_punctuation: false,
            skip_stopwords: false,
            stopwords: DEFAULT_STOPWORDS.iter().map(|s| s.to_string()).collect(),
            reading_mode: ReadingMode::Serial,
            highlight_style: HighlightStyle::Scroll,
            context_lines: 2,
            page_size: 5,
            speed_variability: false,
            pause_at_breaks: true,
        }
    }
}

/// A single settings change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsUpdate {
    /// New target chunk size
    ChunkSize(usize),
    /// New speed in chunks per minute
    Speed(u32),
    /// New flexible range
    FlexibleRange(usize),
    /// Toggle sentence breaking
    SentenceBreak(bool),
    /// Toggle punctuation hiding
    HideEndPunctuation(bool),
    /// Toggle stopword elision
    SkipStopwords(bool),
    /// Replace the stopword list
    Stopwords(Vec<String>),
    /// Switch serial/highlight
    ReadingMode(ReadingMode),
    /// Switch scroll/page
    HighlightStyle(HighlightStyle),
    /// New context line count
    ContextLines(usize),
    /// New page size
    PageSize(usize),
    /// Toggle speed variability
    SpeedVariability(bool),
    /// Toggle dwell at break points
    PauseAtBreaks(bool),
}

/// What the engine has to redo after a settings change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateEffect {
    /// The chunk sequence must be recomputed from scratch
    Rechunk,
    /// Only intervals change; the pending tick is rescheduled
    Repace,
    /// Presentation only; the engine is unaffected
    DisplayOnly,
    /// The value was already current
    Unchanged,
}

fn clamp_to(value: usize, (min, max): (usize, usize)) -> usize {
    value.clamp(min, max)
}

fn check_range(field: &'static str, value: i64, min: i64, max: i64) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ReaderError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

impl ReaderSettings {
    /// Parse a stored JSON record strictly
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to the stored JSON form
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a TOML settings document
    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load settings from a file, JSON for `.json` and TOML otherwise
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_toml(&content)
        }
    }

    /// Write settings to a TOML file
    pub fn save_toml(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Restore settings from the store
    ///
    /// Missing keys keep their defaults and unknown keys are ignored. A
    /// record that does not parse is discarded as a whole; out-of-range
    /// values are clamped.
    pub fn load_or_default(stored: Option<&str>) -> Self {
        let Some(json) = stored else {
            return Self::default();
        };

        match Self::from_json(json) {
            Ok(settings) => {
                if let Err(e) = settings.validate() {
                    log::warn!("Clamping stored settings: {e}");
                }
                settings.clamped()
            }
            Err(e) => {
                log::warn!("Discarding stored settings: {e}");
                Self::default()
            }
        }
    }

    /// Check every numeric field against its allowed range
    pub fn validate(&self) -> Result<()> {
        check_range(
            "chunkSize",
            self.chunk_size as i64,
            MIN_CHUNK_SIZE as i64,
            MAX_CHUNK_SIZE as i64,
        )?;
        check_range(
            "speed",
            i64::from(self.speed),
            i64::from(MIN_SPEED),
            i64::from(MAX_SPEED),
        )?;
        check_range(
            "flexibleRange",
            self.flexible_range as i64,
            FLEXIBLE_RANGE_LIMITS.0 as i64,
            FLEXIBLE_RANGE_LIMITS.1 as i64,
        )?;
        check_range(
            "contextLines",
            self.context_lines as i64,
            CONTEXT_LINES_LIMITS.0 as i64,
            CONTEXT_LINES_LIMITS.1 as i64,
        )?;
        check_range(
            "pageSize",
            self.page_size as i64,
            PAGE_SIZE_LIMITS.0 as i64,
            PAGE_SIZE_LIMITS.1 as i64,
        )?;
        Ok(())
    }

    /// Copy with every numeric field pulled into range
    pub fn clamped(mut self) -> Self {
        self.chunk_size = clamp_to(self.chunk_size, (MIN_CHUNK_SIZE, MAX_CHUNK_SIZE));
        self.speed = self.speed.clamp(MIN_SPEED, MAX_SPEED);
        self.flexible_range = clamp_to(self.flexible_range, FLEXIBLE_RANGE_LIMITS);
        self.context_lines = clamp_to(self.context_lines, CONTEXT_LINES_LIMITS);
        self.page_size = clamp_to(self.page_size, PAGE_SIZE_LIMITS);
        self
    }

    /// Select the presentation by its short name (`serial`, `scroll`, `page`)
    pub fn set_mode_name(&mut self, name: &str) -> Result<()> {
        match name.to_ascii_lowercase().as_str() {
            "serial" => self.reading_mode = ReadingMode::Serial,
            "scroll" => {
                self.reading_mode = ReadingMode::Highlight;
                self.highlight_style = HighlightStyle::Scroll;
            }
            "page" => {
                self.reading_mode = ReadingMode::Highlight;
                self.highlight_style = HighlightStyle::Page;
            }
            _ => {
                return Err(ReaderError::InvalidValue {
                    field: "readingMode",
                    value: name.to_string(),
                })
            }
        }
        Ok(())
    }

    /// The closed presentation variant for these settings
    pub fn display_mode(&self) -> DisplayMode {
        match (self.reading_mode, self.highlight_style) {
            (ReadingMode::Serial, _) => DisplayMode::Serial,
            (ReadingMode::Highlight, HighlightStyle::Scroll) => DisplayMode::Scroll {
                context_lines: self.context_lines,
            },
            (ReadingMode::Highlight, HighlightStyle::Page) => DisplayMode::Page {
                page_size: self.page_size,
            },
        }
    }

    /// Options for the chunker
    pub fn chunking_options(&self) -> ChunkingOptions {
        ChunkingOptions {
            target_size: self.chunk_size,
            flexible_range: self.flexible_range,
            sentence_break: self.sentence_break,
            hide_end_punctuation: self.hide_end_punctuation,
            skip_stopwords: self.skip_stopwords,
            stopwords: self.stopwords.clone(),
            mode: self.display_mode(),
        }
    }

    /// Options for the pacer's interval computation
    pub fn pacing(&self) -> PacingConfig {
        PacingConfig {
            speed: self.speed,
            target_chunk_size: self.chunk_size,
            speed_variability: self.speed_variability,
            pause_at_breaks: self.pause_at_breaks,
            mode: self.display_mode(),
        }
    }

    /// Apply one change, clamping numeric values into range
    pub fn apply(&mut self, update: SettingsUpdate) -> UpdateEffect {
        fn set<T: PartialEq>(field: &mut T, value: T, effect: UpdateEffect) -> UpdateEffect {
            if *field == value {
                UpdateEffect::Unchanged
            } else {
                *field = value;
                effect
            }
        }

        use UpdateEffect::{DisplayOnly, Rechunk, Repace};
        match update {
            SettingsUpdate::ChunkSize(v) => set(
                &mut self.chunk_size,
                clamp_to(v, (MIN_CHUNK_SIZE, MAX_CHUNK_SIZE)),
                Rechunk,
            ),
            SettingsUpdate::FlexibleRange(v) => set(
                &mut self.flexible_range,
                clamp_to(v, FLEXIBLE_RANGE_LIMITS),
                Rechunk,
            ),
            SettingsUpdate::SentenceBreak(v) => set(&mut self.sentence_break, v, Rechunk),
            SettingsUpdate::HideEndPunctuation(v) => {
                set(&mut self.hide_end_punctuation, v, Rechunk)
            }
            SettingsUpdate::SkipStopwords(v) => set(&mut self.skip_stopwords, v, Rechunk),
            SettingsUpdate::Stopwords(v) => set(&mut self.stopwords, v, Rechunk),
            SettingsUpdate::ReadingMode(v) => set(&mut self.reading_mode, v, Rechunk),
            SettingsUpdate::HighlightStyle(v) => set(&mut self.highlight_style, v, Rechunk),
            SettingsUpdate::Speed(v) => {
                set(&mut self.speed, v.clamp(MIN_SPEED, MAX_SPEED), Repace)
            }
            SettingsUpdate::SpeedVariability(v) => set(&mut self.speed_variability, v, Repace),
            SettingsUpdate::PauseAtBreaks(v) => set(&mut self.pause_at_breaks, v, Repace),
            SettingsUpdate::PageSize(v) => {
                set(&mut self.page_size, clamp_to(v, PAGE_SIZE_LIMITS), Repace)
            }
            SettingsUpdate::ContextLines(v) => set(
                &mut self.context_lines,
                clamp_to(v, CONTEXT_LINES_LIMITS),
                DisplayOnly,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ReaderSettings::default();
        assert_eq!(settings.chunk_size, 4);
        assert_eq!(settings.speed, 300);
        assert_eq!(settings.stopwords.len(), 7);
        assert_eq!(settings.display_mode(), DisplayMode::Serial);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_merges_over_defaults() {
        let settings =
            ReaderSettings::load_or_default(Some(r#"{"speed": 450, "unknownKey": true}"#));
        assert_eq!(settings.speed, 450);
        assert_eq!(settings.chunk_size, 4);
        assert!(settings.pause_at_breaks);
    }

    #[test]
    fn test_malformed_json_discarded() {
        let settings = ReaderSettings::load_or_default(Some("{speed: fast"));
        assert_eq!(settings, ReaderSettings::default());

        let wrong_type = ReaderSettings::load_or_default(Some(r#"{"speed": "fast"}"#));
        assert_eq!(wrong_type, ReaderSettings::default());
    }

    #[test]
    fn test_missing_record_is_default() {
        assert_eq!(
            ReaderSettings::load_or_default(None),
            ReaderSettings::default()
        );
    }

    #[test]
    fn test_out_of_range_values_clamped_on_load() {
        let settings = ReaderSettings::load_or_default(Some(r#"{"speed": 5000, "pageSize": 1}"#));
        assert_eq!(settings.speed, MAX_SPEED);
        assert_eq!(settings.page_size, 3);
    }

    #[test]
    fn test_validate_reports_field() {
        let settings = ReaderSettings {
            chunk_size: 20,
            ..Default::default()
        };
        match settings.validate() {
            Err(ReaderError::OutOfRange { field, value, .. }) => {
                assert_eq!(field, "chunkSize");
                assert_eq!(value, 20);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_camel_case_round_trip() {
        let json = ReaderSettings::default().to_json().unwrap();
        assert!(json.contains("\"chunkSize\":4"));
        assert!(json.contains("\"readingMode\":\"serial\""));
        assert!(json.contains("\"highlightStyle\":\"scroll\""));
        let back = ReaderSettings::from_json(&json).unwrap();
        assert_eq!(back, ReaderSettings::default());
    }

    #[test]
    fn test_toml_document() {
        let settings = ReaderSettings::from_toml(
            r#"
chunkSize = 6
readingMode = "highlight"
highlightStyle = "page"
"#,
        )
        .unwrap();
        assert_eq!(settings.chunk_size, 6);
        assert_eq!(settings.display_mode(), DisplayMode::Page { page_size: 5 });
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let toml_path = dir.path().join("settings.toml");
        let settings = ReaderSettings {
            speed: 540,
            skip_stopwords: true,
            ..Default::default()
        };
        settings.save_toml(&toml_path).unwrap();
        assert_eq!(ReaderSettings::load_file(&toml_path).unwrap(), settings);

        let json_path = dir.path().join("settings.json");
        fs::write(&json_path, settings.to_json().unwrap()).unwrap();
        assert_eq!(ReaderSettings::load_file(&json_path).unwrap(), settings);

        let missing = ReaderSettings::load_file(&dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(ReaderError::Io(_))));
    }

    #[test]
    fn test_display_mode_projection() {
        let mut settings = ReaderSettings::default();
        settings.set_mode_name("scroll").unwrap();
        assert_eq!(
            settings.display_mode(),
            DisplayMode::Scroll { context_lines: 2 }
        );
        assert!(settings.set_mode_name("sideways").is_err());
    }

    #[test]
    fn test_page_mode_disables_hiding() {
        let settings = ReaderSettings {
            hide_end_punctuation: true,
            reading_mode: ReadingMode::Highlight,
            highlight_style: HighlightStyle::Page,
            ..Default::default()
        };
        assert!(!settings.chunking_options().hides_punctuation());
    }

    #[test]
    fn test_update_effects() {
        let mut settings = ReaderSettings::default();
        assert_eq!(
            settings.apply(SettingsUpdate::ChunkSize(6)),
            UpdateEffect::Rechunk
        );
        assert_eq!(
            settings.apply(SettingsUpdate::ChunkSize(6)),
            UpdateEffect::Unchanged
        );
        assert_eq!(
            settings.apply(SettingsUpdate::Speed(420)),
            UpdateEffect::Repace
        );
        assert_eq!(
            settings.apply(SettingsUpdate::ContextLines(4)),
            UpdateEffect::DisplayOnly
        );
        assert_eq!(
            settings.apply(SettingsUpdate::HighlightStyle(HighlightStyle::Page)),
            UpdateEffect::Rechunk
        );
    }

    #[test]
    fn test_update_clamps() {
        let mut settings = ReaderSettings::default();
        settings.apply(SettingsUpdate::Speed(10));
        assert_eq!(settings.speed, MIN_SPEED);
        settings.apply(SettingsUpdate::ChunkSize(99));
        assert_eq!(settings.chunk_size, MAX_CHUNK_SIZE);
    }
}
