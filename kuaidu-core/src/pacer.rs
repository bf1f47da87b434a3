//! Paced reveal of a chunk sequence
//!
//! The [`Pacer`] owns the text, its chunks, the reading position and at most
//! one scheduled tick. It never sleeps or spawns anything: the owner calls
//! [`Pacer::poll`] whenever it likes (typically after sleeping until
//! [`Pacer::next_deadline`]) and receives at most one [`PacerEvent`] per
//! call. Time comes from an injected [`Clock`], so several pacers can run
//! side by side and tests can drive one with a [`ManualClock`](crate::clock::ManualClock).
//!
//! ```text
//!  Idle --set_text--> Ready --start--> Playing --pause--> Paused
//!                       ^                 |  ^              |
//!                       |               tick  `---start-----'
//!                     reset               |
//!                       |                 v
//!                       `------------ Finished (start restarts at 0)
//! ```

use crate::{
    chunker::{Chunk, Chunker},
    clock::{Clock, SystemClock},
    config::{
        PacingConfig, DWELL_FACTOR, MAX_CHUNK_SIZE, MAX_SPEED, MAX_VARIABILITY_FACTOR,
        MIN_CHUNK_SIZE, MIN_SPEED, MIN_VARIABILITY_FACTOR,
    },
    settings::{ReaderSettings, SettingsUpdate, UpdateEffect},
    stats::ReadingStats,
};

/// Lifecycle state of a [`Pacer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacerState {
    /// No text, or text without any chunk
    Idle,
    /// Chunks available, not playing
    Ready,
    /// Ticks are being scheduled
    Playing,
    /// Stopped mid-text; `start` resumes from the current position
    Paused,
    /// Every chunk has been shown
    Finished,
}

/// Something the display should react to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PacerEvent {
    /// A chunk became visible
    ChunkShown {
        /// Index of the chunk in the sequence
        index: usize,
        /// The chunk itself
        chunk: Chunk,
    },
    /// The last chunk has been read
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScheduledTick {
    due_at_ms: u64,
    // Chunk whose dwell time this tick waits out
    dwell_index: usize,
    id: u64,
}

/// Chunking and pacing session for one text
#[derive(Debug)]
pub struct Pacer<C: Clock = SystemClock> {
    clock: C,
    settings: ReaderSettings,
    chunker: Chunker,
    pacing: PacingConfig,
    text: String,
    chunks: Vec<Chunk>,
    position: usize,
    state: PacerState,
    pending: Option<ScheduledTick>,
    next_tick_id: u64,
    active_ms: u64,
    resumed_at: Option<u64>,
}

impl Pacer<SystemClock> {
    /// Create an idle pacer on the system clock
    pub fn new(settings: ReaderSettings) -> Self {
        Self::with_clock(settings, SystemClock::new())
    }
}

impl<C: Clock> Pacer<C> {
    /// Create an idle pacer on a custom clock
    pub fn with_clock(settings: ReaderSettings, clock: C) -> Self {
        let chunker = Chunker::new(settings.chunking_options());
        let pacing = settings.pacing();
        Self {
            clock,
            settings,
            chunker,
            pacing,
            text: String::new(),
            chunks: Vec::new(),
            position: 0,
            state: PacerState::Idle,
            pending: None,
            next_tick_id: 0,
            active_ms: 0,
            resumed_at: None,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> PacerState {
        self.state
    }

    /// Index of the next chunk to show; equals the chunk count when finished
    pub fn position(&self) -> usize {
        self.position
    }

    /// The full chunk sequence
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Number of chunks
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// The most recently shown chunk
    pub fn current_chunk(&self) -> Option<&Chunk> {
        self.position.checked_sub(1).and_then(|i| self.chunks.get(i))
    }

    /// The loaded text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Settings in effect
    pub fn settings(&self) -> &ReaderSettings {
        &self.settings
    }

    /// Speed in chunks per minute
    pub fn speed(&self) -> u32 {
        self.pacing.speed
    }

    /// Whether ticks are being scheduled
    pub fn is_playing(&self) -> bool {
        self.state == PacerState::Playing
    }

    /// Whether playback is paused mid-text
    pub fn is_paused(&self) -> bool {
        self.state == PacerState::Paused
    }

    /// Clock time at which the pending tick is due
    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.map(|tick| tick.due_at_ms)
    }

    /// Number of scheduled ticks, never more than one
    pub fn pending_ticks(&self) -> usize {
        usize::from(self.pending.is_some())
    }

    /// Load new text, replacing any previous session
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.rechunk();
    }

    /// Begin or resume playback
    ///
    /// Does nothing without chunks or when already playing. From `Finished`
    /// playback restarts at the first chunk.
    pub fn start(&mut self) {
        match self.state {
            PacerState::Idle | PacerState::Playing => return,
            PacerState::Finished => {
                self.position = 0;
                self.active_ms = 0;
            }
            PacerState::Ready | PacerState::Paused => {}
        }
        if self.chunks.is_empty() {
            return;
        }

        log::debug!("start at {}/{}", self.position, self.chunks.len());
        self.state = PacerState::Playing;
        self.resumed_at = Some(self.clock.now_ms());
        self.schedule(self.position);
    }

    /// Stop playback, keeping the position
    pub fn pause(&mut self) {
        if self.state != PacerState::Playing {
            return;
        }
        log::debug!("pause at {}/{}", self.position, self.chunks.len());
        self.cancel();
        self.stop_timing();
        self.state = PacerState::Paused;
    }

    /// Rewind to the first chunk and stop
    pub fn reset(&mut self) {
        self.cancel();
        self.stop_timing();
        self.active_ms = 0;
        self.position = 0;
        self.state = if self.chunks.is_empty() {
            PacerState::Idle
        } else {
            PacerState::Ready
        };
        log::debug!("reset, {} chunks", self.chunks.len());
    }

    /// Drop the text and return to `Idle`
    pub fn reset_all(&mut self) {
        self.text.clear();
        self.chunks.clear();
        self.reset();
    }

    /// End the session
    pub fn dispose(mut self) {
        self.cancel();
        log::debug!("dispose at {}/{}", self.position, self.chunks.len());
    }

    /// Jump to chunk `index` while ready or paused
    ///
    /// The index is clamped to the sequence. Returns whether the position
    /// was applied.
    pub fn set_position(&mut self, index: usize) -> bool {
        if !matches!(self.state, PacerState::Ready | PacerState::Paused) || self.chunks.is_empty() {
            return false;
        }
        self.position = index.min(self.chunks.len() - 1);
        true
    }

    /// Jump to a fraction of the text while ready or paused
    pub fn seek_fraction(&mut self, fraction: f64) -> bool {
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let index = (fraction * self.chunks.len() as f64).floor() as usize;
        self.set_position(index)
    }

    /// Move one chunk forward in any state with chunks
    ///
    /// Never moves past the last chunk, and never backwards once the last
    /// chunk has been shown.
    pub fn step_forward(&mut self) -> bool {
        if self.state == PacerState::Finished || self.position + 1 >= self.chunks.len() {
            return false;
        }
        self.position += 1;
        if self.is_playing() {
            self.schedule(self.position);
        }
        true
    }

    /// Move one chunk back in any state with chunks
    ///
    /// From `Finished` this lands on the last chunk, paused.
    pub fn step_back(&mut self) -> bool {
        if self.chunks.is_empty() || self.position == 0 {
            return false;
        }
        self.position -= 1;
        if self.state == PacerState::Finished {
            self.state = PacerState::Paused;
        }
        if self.is_playing() {
            self.schedule(self.position);
        }
        true
    }

    /// Change speed by `delta` chunks per minute
    ///
    /// Ignored when the result would leave the allowed range. A pending tick
    /// is rescheduled from now with the new interval.
    pub fn adjust_speed(&mut self, delta: i32) -> bool {
        let speed = i64::from(self.pacing.speed) + i64::from(delta);
        if !(i64::from(MIN_SPEED)..=i64::from(MAX_SPEED)).contains(&speed) {
            return false;
        }
        self.apply_update(SettingsUpdate::Speed(speed as u32)) != UpdateEffect::Unchanged
    }

    /// Change the target chunk size by `delta`
    ///
    /// While playing or paused only the chunks from the current position on
    /// are recomputed, so everything already read stays as it was. Otherwise
    /// the whole text is re-chunked and the position resets.
    pub fn adjust_chunk_size(&mut self, delta: i32) -> bool {
        let size = self.settings.chunk_size as i64 + i64::from(delta);
        if !(MIN_CHUNK_SIZE as i64..=MAX_CHUNK_SIZE as i64).contains(&size) {
            return false;
        }
        if matches!(self.state, PacerState::Playing | PacerState::Paused) {
            self.settings.chunk_size = size as usize;
            self.refresh_config();
            self.splice_tail();
            true
        } else {
            self.apply_update(SettingsUpdate::ChunkSize(size as usize)) != UpdateEffect::Unchanged
        }
    }

    /// Apply a settings change and redo whatever it invalidates
    pub fn apply_update(&mut self, update: SettingsUpdate) -> UpdateEffect {
        let effect = self.settings.apply(update);
        match effect {
            UpdateEffect::Rechunk => {
                self.refresh_config();
                self.rechunk();
            }
            UpdateEffect::Repace => {
                self.refresh_config();
                if let Some(tick) = self.pending {
                    self.schedule(tick.dwell_index);
                }
            }
            UpdateEffect::DisplayOnly | UpdateEffect::Unchanged => {}
        }
        effect
    }

    /// Fire the pending tick if it is due
    pub fn poll(&mut self) -> Option<PacerEvent> {
        let tick = self.pending?;
        if self.clock.now_ms() < tick.due_at_ms {
            return None;
        }
        self.pending = None;
        log::trace!("tick {} at {}/{}", tick.id, self.position, self.chunks.len());

        match self.chunks.get(self.position) {
            Some(chunk) => {
                let index = self.position;
                let chunk = chunk.clone();
                self.position += 1;
                self.schedule(index);
                Some(PacerEvent::ChunkShown { index, chunk })
            }
            None => {
                self.stop_timing();
                self.state = PacerState::Finished;
                log::debug!("finished {} chunks", self.chunks.len());
                Some(PacerEvent::Finished)
            }
        }
    }

    /// Dwell time for chunk `index`, in milliseconds
    pub fn interval_ms(&self, index: usize) -> u64 {
        let mut interval = self.pacing.base_interval_ms();

        if let Some(page_size) = self.pacing.mode.page_size() {
            if page_size > 0 && index % page_size == 0 {
                interval *= DWELL_FACTOR;
            }
        }

        if let Some(chunk) = self.chunks.get(index) {
            if self.pacing.speed_variability {
                let target = self.pacing.target_chunk_size.max(1) as f64;
                let factor = (chunk.char_len() as f64 / target)
                    .clamp(MIN_VARIABILITY_FACTOR, MAX_VARIABILITY_FACTOR);
                interval *= factor;
            }
            if self.pacing.pause_at_breaks && chunk.break_point {
                interval *= DWELL_FACTOR;
            }
        }

        (interval.round() as u64).max(1)
    }

    /// Reading statistics at the current clock time
    pub fn stats(&self) -> ReadingStats {
        let running = self
            .resumed_at
            .map_or(0, |since| self.clock.now_ms().saturating_sub(since));
        ReadingStats::compute(
            self.position,
            self.chunks.len(),
            self.active_ms + running,
            self.pacing.speed,
        )
    }

    fn schedule(&mut self, dwell_index: usize) {
        let id = self.next_tick_id;
        self.next_tick_id += 1;
        self.pending = Some(ScheduledTick {
            due_at_ms: self.clock.now_ms() + self.interval_ms(dwell_index),
            dwell_index,
            id,
        });
    }

    fn cancel(&mut self) {
        if let Some(tick) = self.pending.take() {
            log::trace!("cancel tick {}", tick.id);
        }
    }

    fn stop_timing(&mut self) {
        if let Some(since) = self.resumed_at.take() {
            self.active_ms += self.clock.now_ms().saturating_sub(since);
        }
    }

    fn refresh_config(&mut self) {
        self.chunker = Chunker::new(self.settings.chunking_options());
        self.pacing = self.settings.pacing();
    }

    fn rechunk(&mut self) {
        self.chunks = self.chunker.chunk_text(&self.text);
        self.reset();
    }

    fn splice_tail(&mut self) {
        let Some(start) = self.chunks.get(self.position).map(|c| c.source.start) else {
            return;
        };
        let tail = self.chunker.chunk_from(&self.text, start);
        log::debug!(
            "re-chunked tail from {}: {} -> {} chunks",
            self.position,
            self.chunks.len() - self.position,
            tail.len()
        );
        self.chunks.truncate(self.position);
        self.chunks.extend(tail);

        if let Some(tick) = self.pending {
            self.schedule(tick.dwell_index.min(self.chunks.len().saturating_sub(1)));
        }
    }
}
