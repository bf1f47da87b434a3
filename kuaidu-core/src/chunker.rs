//! Text chunking for paced display
//!
//! A greedy forward scan with bounded lookahead, run independently on every
//! line of the input. Each step picks a boundary inside a tolerance window
//! around the target size, preferring sentence endings, then clause
//! punctuation and semantic-unit edges, and finally a hard cut.

use crate::{
    config::ChunkingOptions,
    punctuation::{self, PunctuationClass},
    semantic::{self, SemanticUnit},
};
use serde::{Deserialize, Serialize};
use std::ops::Range;

// Longest span looked back over when checking whether a unit ends at a cut.
const MAX_UNIT_LOOKBACK: usize = 8;

const PUNCTUATION_BONUS: i64 = 3;
const UNIT_END_BONUS: i64 = 2;
const UNIT_START_PENALTY: i64 = 5;

/// One displayable unit of text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Text shown to the reader
    pub text: String,
    /// Whether the chunk consumed trailing punctuation (shown or hidden)
    pub has_punctuation: bool,
    /// The trailing punctuation character, if any
    pub punctuation: Option<char>,
    /// Byte range of the source text consumed by this chunk
    pub source: Range<usize>,
    /// Ends at a sentence ending, paragraph ending or end of line
    pub break_point: bool,
}

impl Chunk {
    /// Visible length in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// The slice of `text` this chunk was cut from
    pub fn source_text<'a>(&self, text: &'a str) -> &'a str {
        &text[self.source.clone()]
    }
}

/// Splits text into [`Chunk`]s according to a set of [`ChunkingOptions`]
///
/// Chunking is a pure computation: the same text and options always yield
/// the same sequence.
#[derive(Debug, Clone)]
pub struct Chunker {
    options: ChunkingOptions,
    stopwords: Vec<Vec<char>>,
}

/// Where the current chunk ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cut {
    /// Exclusive end of the chunk body
    end: usize,
    /// Index of the consumed trailing punctuation
    punctuation: Option<usize>,
    /// Where the next chunk starts
    next: usize,
}

impl Cut {
    fn before(pos: usize) -> Self {
        Self {
            end: pos,
            punctuation: None,
            next: pos,
        }
    }

    fn at_punctuation(pos: usize) -> Self {
        Self {
            end: pos,
            punctuation: Some(pos),
            next: pos + 1,
        }
    }
}

/// A line after stopword elision, with the source offset of every character
struct Line {
    chars: Vec<char>,
    source: Vec<usize>,
    filtered: String,
    filtered_offsets: Vec<usize>,
}

impl Line {
    fn build(line: &str, base: usize, stopwords: &[Vec<char>]) -> Self {
        let indexed: Vec<(usize, char)> = line.char_indices().collect();
        let mut chars = Vec::with_capacity(indexed.len());
        let mut source = Vec::with_capacity(indexed.len());
        let mut filtered = String::with_capacity(line.len());
        let mut filtered_offsets = Vec::with_capacity(indexed.len() + 1);

        let mut k = 0;
        while k < indexed.len() {
            if let Some(len) = matching_stopword(&indexed[k..], stopwords) {
                k += len;
                continue;
            }

            let (offset, ch) = indexed[k];
            chars.push(ch);
            source.push(base + offset);
            filtered_offsets.push(filtered.len());
            filtered.push(ch);
            k += 1;
        }
        filtered_offsets.push(filtered.len());

        Self {
            chars,
            source,
            filtered,
            filtered_offsets,
        }
    }

    fn len(&self) -> usize {
        self.chars.len()
    }

    fn source_end(&self, pos: usize) -> usize {
        self.source[pos] + self.chars[pos].len_utf8()
    }

    fn unit_at(&self, pos: usize) -> Option<SemanticUnit> {
        semantic::unit_at(&self.filtered[self.filtered_offsets[pos]..])
    }

    /// Whether some semantic unit inside `[floor, pos)` ends exactly at `pos`
    fn unit_ends_at(&self, floor: usize, pos: usize) -> bool {
        let start = pos.saturating_sub(MAX_UNIT_LOOKBACK).max(floor);
        (start..pos).any(|k| self.unit_at(k).is_some_and(|unit| k + unit.len == pos))
    }

    fn non_whitespace_between(&self, range: Range<usize>) -> usize {
        self.chars[range]
            .iter()
            .filter(|c| !c.is_whitespace())
            .count()
    }
}

fn matching_stopword(rest: &[(usize, char)], stopwords: &[Vec<char>]) -> Option<usize> {
    stopwords
        .iter()
        .find(|word| {
            word.len() <= rest.len() && word.iter().zip(rest).all(|(a, (_, b))| a == b)
        })
        .map(Vec::len)
}

impl Chunker {
    /// Create a chunker for the given options
    pub fn new(options: ChunkingOptions) -> Self {
        let mut stopwords: Vec<Vec<char>> = if options.skip_stopwords {
            options
                .stopwords
                .iter()
                .map(|word| word.chars().collect::<Vec<_>>())
                .filter(|word| !word.is_empty())
                .collect()
        } else {
            Vec::new()
        };
        // Longest entry first so multi-character stopwords win.
        stopwords.sort_by(|a, b| b.len().cmp(&a.len()));

        Self { options, stopwords }
    }

    /// The options this chunker was built with
    pub fn options(&self) -> &ChunkingOptions {
        &self.options
    }

    /// Chunk the whole text
    pub fn chunk_text(&self, text: &str) -> Vec<Chunk> {
        self.chunk_from(text, 0)
    }

    /// Chunk `text[offset..]`, reporting source ranges against the full text
    ///
    /// `offset` must lie on a character boundary; the start of any chunk's
    /// source range does.
    pub fn chunk_from(&self, text: &str, offset: usize) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        if offset >= text.len() {
            return chunks;
        }

        let mut line_start = offset;
        for raw_line in text[offset..].split('\n') {
            let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
            if !line.trim().is_empty() {
                self.chunk_line(line, line_start, &mut chunks);
            }
            line_start += raw_line.len() + 1;
        }

        log::debug!(
            "chunked {} bytes into {} chunks (target {}, window {:?})",
            text.len() - offset,
            chunks.len(),
            self.options.target(),
            self.options.window()
        );

        chunks
    }

    fn chunk_line(&self, raw: &str, base: usize, chunks: &mut Vec<Chunk>) {
        let line = Line::build(raw, base, &self.stopwords);
        let hide = self.options.hides_punctuation();
        let first_in_line = chunks.len();
        let n = line.len();

        let mut i = 0;
        while i < n {
            if line.chars[i].is_whitespace() {
                i += 1;
                continue;
            }

            if chunks.len() > first_in_line {
                if let Some(PunctuationClass::BreakPoint | PunctuationClass::Clause) =
                    punctuation::classify(&line.chars, i)
                {
                    if let Some(previous) = chunks.last_mut() {
                        absorb_punctuation(previous, &line, i, hide);
                    }
                    i += 1;
                    continue;
                }
            }

            let cut = self.find_cut(&line, i);
            let cut = self.merge_short_tail(&line, cut);
            chunks.push(emit(&line, i, cut, hide));
            i = cut.next;
        }

        if chunks.len() > first_in_line {
            if let Some(last) = chunks.last_mut() {
                last.break_point = true;
            }
        }
    }

    fn find_cut(&self, line: &Line, i: usize) -> Cut {
        let n = line.len();
        let target = self.options.target();
        let (min, max) = self.options.window();
        let lo = i + min;

        if self.options.sentence_break {
            // One character of lookahead past the window: a sentence ending
            // right after a maximal body still closes the chunk.
            let hi = (i + max + 1).min(n - 1);
            if let Some(j) = (lo..=hi).find(|&j| punctuation::is_break_point(&line.chars, j)) {
                return Cut::at_punctuation(j);
            }
        }

        let hi = (i + max).min(n - 1);
        let mut best: Option<(i64, Cut)> = None;
        for j in lo..=hi {
            let distance = ((j - i) as i64 - target as i64).abs();
            let penalty = if line.unit_at(j).is_some() {
                UNIT_START_PENALTY
            } else {
                0
            };

            let candidate = match punctuation::classify(&line.chars, j) {
                Some(PunctuationClass::Opening) => {
                    Some((distance + penalty - PUNCTUATION_BONUS, Cut::before(j)))
                }
                Some(_) => Some((distance + penalty - PUNCTUATION_BONUS, Cut::at_punctuation(j))),
                None if line.unit_ends_at(i, j) => {
                    Some((distance + penalty - UNIT_END_BONUS, Cut::before(j)))
                }
                None => None,
            };

            if let Some((score, cut)) = candidate {
                if best.map_or(true, |(best_score, _)| score < best_score) {
                    best = Some((score, cut));
                }
            }
        }

        best.map(|(_, cut)| cut)
            .unwrap_or_else(|| Cut::before((i + target).min(n)))
    }

    /// Fold a remainder shorter than the window minimum into this chunk
    fn merge_short_tail(&self, line: &Line, cut: Cut) -> Cut {
        let n = line.len();
        let (min, _) = self.options.window();
        let remaining = line.non_whitespace_between(cut.next.min(n)..n);
        if remaining == 0 || remaining >= min {
            return cut;
        }

        let last = (0..n)
            .rev()
            .find(|&p| !line.chars[p].is_whitespace())
            .unwrap_or(n - 1);
        match punctuation::classify(&line.chars, last) {
            Some(PunctuationClass::BreakPoint | PunctuationClass::Clause) if last >= cut.next => {
                Cut {
                    end: last,
                    punctuation: Some(last),
                    next: n,
                }
            }
            _ => Cut {
                end: n,
                punctuation: None,
                next: n,
            },
        }
    }
}

fn emit(line: &Line, start: usize, cut: Cut, hide: bool) -> Chunk {
    let body: String = line.chars[start..cut.end].iter().collect();
    let mut text = body.trim_end().to_string();
    let punctuation = cut.punctuation.map(|p| line.chars[p]);
    if let Some(mark) = punctuation {
        if !hide {
            text.push(mark);
        }
    }

    let last = cut.punctuation.unwrap_or(cut.end - 1);
    Chunk {
        text,
        has_punctuation: punctuation.is_some(),
        punctuation,
        source: line.source[start]..line.source_end(last),
        break_point: punctuation.is_some_and(punctuation::is_break_char),
    }
}

fn absorb_punctuation(chunk: &mut Chunk, line: &Line, pos: usize, hide: bool) {
    let mark = line.chars[pos];
    if !hide {
        chunk.text.push(mark);
    }
    if chunk.punctuation.is_none() {
        chunk.punctuation = Some(mark);
        chunk.has_punctuation = true;
    }
    chunk.source.end = line.source_end(pos);
    chunk.break_point |= punctuation::is_break_char(mark);
}

/// Chunk `text` with `options`
pub fn chunk_text(text: &str, options: &ChunkingOptions) -> Vec<Chunk> {
    Chunker::new(options.clone()).chunk_text(text)
}
