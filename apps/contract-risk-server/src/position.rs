//! Best-effort location of a risky clause inside the submitted text
//!
//! Only used to highlight clauses in the viewer; analysis never depends on
//! it. Offsets are character indices. Lookup order: exact match,
//! case-insensitive match, the first [`PREFIX_CHARS`] characters of the
//! clause, and finally an estimate from the clause's rank among the
//! violations.

use regex::RegexBuilder;

/// Length of the clause prefix tried when the full text is not found
pub const PREFIX_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClauseSpan {
    pub start: usize,
    pub end: usize,
}

/// Locate `clause_text` in `text`. `rank` is the violation's index among
/// `total` violations.
pub fn locate_clause(text: &str, clause_text: &str, rank: usize, total: usize) -> ClauseSpan {
    let text_chars = text.chars().count();
    let clause_chars = clause_text.chars().count();

    let start = text
        .find(clause_text)
        .or_else(|| find_ignoring_case(text, clause_text))
        .or_else(|| {
            let prefix: String = clause_text.chars().take(PREFIX_CHARS).collect();
            find_ignoring_case(text, &prefix)
        })
        .map(|byte_offset| text[..byte_offset].chars().count())
        .unwrap_or_else(|| estimate_start(rank, total, text_chars));

    ClauseSpan {
        start: start.min(text_chars),
        end: start.saturating_add(clause_chars).min(text_chars),
    }
}

fn find_ignoring_case(text: &str, needle: &str) -> Option<usize> {
    RegexBuilder::new(&regex::escape(needle))
        .case_insensitive(true)
        .build()
        .ok()?
        .find(text)
        .map(|m| m.start())
}

fn estimate_start(rank: usize, total: usize, text_chars: usize) -> usize {
    rank.saturating_mul(text_chars) / total.max(1)
}
