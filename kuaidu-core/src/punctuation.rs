//! Punctuation classification shared by the chunker and the pacer
//!
//! Reading text is predominantly CJK with Latin mixed in, so both
//! full-width and ASCII marks are recognised:
//! - 。 ！ ？ and `! ? .` end a sentence (break points)
//! - U+2029 (paragraph separator) ends a paragraph
//! - 、 ， ； ： and friends are clause punctuation (boundary candidates only)
//! - opening brackets and quotes belong to the text that follows them

/// Characters that end a sentence
pub const SENTENCE_ENDINGS: &[char] = &['。', '！', '？', '!', '?', '.'];

/// Characters that end a paragraph inside a single line
pub const PARAGRAPH_ENDINGS: &[char] = &['\u{2029}'];

/// Opening brackets and quotes
pub const OPENING_MARKS: &[char] = &['「', '『', '（', '(', '《', '“', '‘', '【', '['];

const OTHER_PUNCTUATION: &[char] = &[
    '，', '、', '；', '：', '」', '』', '）', '》', '”', '’', '】', '…', '—', '～', '·', ',', ';',
    ':', '"', '\'', ')', ']',
];

/// Character class used by the chunker's boundary search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PunctuationClass {
    /// Ends a sentence or a paragraph
    BreakPoint,
    /// Opens a bracketed or quoted span
    Opening,
    /// Any other punctuation
    Clause,
}

/// Classify `chars[pos]`, or `None` for non-punctuation
///
/// Context is needed for `.`: between two ASCII digits it is a decimal
/// point and not punctuation at all.
pub fn classify(chars: &[char], pos: usize) -> Option<PunctuationClass> {
    let ch = *chars.get(pos)?;

    if ch == '.' && is_decimal_context(chars, pos) {
        return None;
    }

    if SENTENCE_ENDINGS.contains(&ch) || PARAGRAPH_ENDINGS.contains(&ch) {
        Some(PunctuationClass::BreakPoint)
    } else if OPENING_MARKS.contains(&ch) {
        Some(PunctuationClass::Opening)
    } else if OTHER_PUNCTUATION.contains(&ch) {
        Some(PunctuationClass::Clause)
    } else {
        None
    }
}

/// Whether `chars[pos]` ends a sentence or paragraph
pub fn is_break_point(chars: &[char], pos: usize) -> bool {
    classify(chars, pos) == Some(PunctuationClass::BreakPoint)
}

/// Whether a standalone character ends a sentence or paragraph
pub fn is_break_char(ch: char) -> bool {
    SENTENCE_ENDINGS.contains(&ch) || PARAGRAPH_ENDINGS.contains(&ch)
}

fn is_decimal_context(chars: &[char], pos: usize) -> bool {
    let before = pos
        .checked_sub(1)
        .and_then(|p| chars.get(p))
        .is_some_and(|c| c.is_ascii_digit());
    let after = chars.get(pos + 1).is_some_and(|c| c.is_ascii_digit());

    before && after
}
