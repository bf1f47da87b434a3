//! Short Chinese phrases the chunker avoids splitting
//!
//! A semantic unit is a quantity, time, preposition, auxiliary particle or
//! conjunction recognised by a small anchored pattern table. The chunker
//! penalises cutting right before a unit and favours cutting right after one.

use regex::Regex;
use std::sync::OnceLock;

/// Kind of phrase recognised as a semantic unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticKind {
    /// Numeral run with an optional measure word (三本, 几次)
    Quantity,
    /// Relative day/time phrase (今天, 明年)
    Time,
    /// Single-character preposition (在, 把, 从)
    Preposition,
    /// Structural or modal particle (的, 了, 吗)
    Auxiliary,
    /// Two-character conjunction (但是, 所以)
    Conjunction,
}

/// A unit matched at some position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SemanticUnit {
    /// What kind of phrase matched
    pub kind: SemanticKind,
    /// Length in characters
    pub len: usize,
}

const PATTERNS: &[(SemanticKind, &str)] = &[
    (
        SemanticKind::Quantity,
        "[一二三四五六七八九十百千万亿两几多少]+[个本次张支条件批节双对]?",
    ),
    (SemanticKind::Time, "[今明后昨前]+[天年月日周时分秒]"),
    (
        SemanticKind::Preposition,
        "在|把|从|向|往|给|对|为|被|让|由|与|和|跟|同|以",
    ),
    (
        SemanticKind::Auxiliary,
        "的|地|得|着|过|了|吗|呢|啊|吧|么|哦|呀|啦",
    ),
    (
        SemanticKind::Conjunction,
        "而且|或者|但是|不过|然后|因此|所以|如果|虽然|即使|无论|只要",
    ),
];

static UNIT_TABLE: OnceLock<Vec<(SemanticKind, Regex)>> = OnceLock::new();

fn unit_table() -> &'static [(SemanticKind, Regex)] {
    UNIT_TABLE.get_or_init(|| {
        PATTERNS
            .iter()
            .map(|(kind, pattern)| {
                let anchored = format!("^(?:{pattern})");
                let regex = Regex::new(&anchored).expect("built-in semantic unit pattern");
                (*kind, regex)
            })
            .collect()
    })
}

/// Longest semantic unit starting at the beginning of `text`
pub fn unit_at(text: &str) -> Option<SemanticUnit> {
    unit_table()
        .iter()
        .filter_map(|(kind, regex)| {
            regex.find(text).map(|m| SemanticUnit {
                kind: *kind,
                len: m.as_str().chars().count(),
            })
        })
        .filter(|unit| unit.len > 0)
        .max_by(|a, b| a.len.cmp(&b.len).then_with(|| b.kind_rank().cmp(&a.kind_rank())))
}

impl SemanticUnit {
    // Earlier table entries win ties.
    fn kind_rank(&self) -> usize {
        PATTERNS
            .iter()
            .position(|(kind, _)| *kind == self.kind)
            .unwrap_or(PATTERNS.len())
    }
}
