//! Chunking and pacing engine for speed reading
//!
//! Text is cut into short chunks sized around a target character count,
//! preferring sentence endings, clause punctuation and the edges of short
//! Chinese phrases. A [`Pacer`] then reveals the chunks one at a time at a
//! pace derived from the configured speed, the chunk length and whether the
//! chunk closes a sentence.
//!
//! # Example
//!
//! ```rust
//! use kuaidu_core::{chunk_text, ChunkingOptions};
//!
//! let options = ChunkingOptions {
//!     target_size: 4,
//!     flexible_range: 1,
//!     sentence_break: true,
//!     ..Default::default()
//! };
//! let chunks = chunk_text("今天天气很好。明天也不错！", &options);
//! let texts: Vec<_> = chunks.iter().map(|c| c.text.as_str()).collect();
//! assert_eq!(texts, ["今天天气很好。", "明天也不错！"]);
//! ```
//!
//! Driving a pacer with a manual clock:
//!
//! ```rust
//! use kuaidu_core::{ManualClock, Pacer, PacerEvent, ReaderSettings};
//!
//! let clock = ManualClock::new(0);
//! let mut pacer = Pacer::with_clock(ReaderSettings::default(), clock.clone());
//! pacer.set_text("你好。");
//! pacer.start();
//!
//! clock.advance(pacer.interval_ms(0));
//! assert!(matches!(pacer.poll(), Some(PacerEvent::ChunkShown { index: 0, .. })));
//! ```

#![warn(missing_docs)]

pub mod chunker;
pub mod clock;
pub mod config;
pub mod error;
pub mod pacer;
pub mod punctuation;
pub mod semantic;
pub mod settings;
pub mod stats;

pub use chunker::{chunk_text, Chunk, Chunker};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ChunkingOptions, DisplayMode, PacingConfig};
pub use error::{ReaderError, Result};
pub use pacer::{Pacer, PacerEvent, PacerState};
pub use settings::{
    HighlightStyle, ReaderSettings, ReadingMode, SettingsUpdate, UpdateEffect, SETTINGS_KEY,
};
pub use stats::ReadingStats;
