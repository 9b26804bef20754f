//! Clause segmentation
//!
//! Strategies are tried in priority order and the first one that finds more
//! than three clauses wins:
//! 1. Numbered labels (`1.`, `2.3`, `4.1.`)
//! 2. All-caps section headers (`PAYMENT TERMS:`)
//! 3. Blank-line separated paragraphs (fragments under 50 chars dropped)
//!
//! Every clause is a trimmed slice of the input, in document order.

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::Clause;

lazy_static! {
    /// `N.` or `N.N` / `N.N.` at the start of a line
    static ref NUMBERED_LABEL: Regex =
        Regex::new(r"^[ \t]*[0-9]+\.(?:[0-9]+\.?)?(?:[ \t]|$)").unwrap();

    /// All-caps header of at least 4 characters followed by a colon
    static ref SECTION_HEADER: Regex =
        Regex::new(r"^[ \t]*[A-Z][A-Z \t]{3,}:(?:[ \t]|$)").unwrap();

    /// One or more empty (or whitespace-only) lines
    static ref BLANK_LINES: Regex = Regex::new(r"\r?\n(?:[ \t]*\r?\n)+").unwrap();
}

/// A structured strategy must find more than this many clauses to be used
const STRUCTURED_MATCH_THRESHOLD: usize = 3;

/// Paragraphs shorter than this (in chars, after trimming) are dropped
pub const MIN_PARAGRAPH_CHARS: usize = 50;

/// Which strategy produced the clauses of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentationStrategy {
    Numbered,
    SectionHeaders,
    Paragraphs,
}

/// Split contract text into clauses
pub fn segment(text: &str) -> Vec<Clause> {
    segment_with_strategy(text).1
}

/// Split contract text into clauses, reporting the strategy that was used
pub fn segment_with_strategy(text: &str) -> (SegmentationStrategy, Vec<Clause>) {
    let numbered = split_at_labels(text, &NUMBERED_LABEL);
    if numbered.len() > STRUCTURED_MATCH_THRESHOLD {
        return (SegmentationStrategy::Numbered, into_clauses(numbered));
    }

    let headers = split_at_labels(text, &SECTION_HEADER);
    if headers.len() > STRUCTURED_MATCH_THRESHOLD {
        return (SegmentationStrategy::SectionHeaders, into_clauses(headers));
    }

    (
        SegmentationStrategy::Paragraphs,
        into_clauses(split_paragraphs(text)),
    )
}

/// Iterate lines with the byte offset where each starts.
/// The yielded line excludes its `\n` / `\r\n` terminator.
fn lines_with_offsets(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = 0;
    text.split_inclusive('\n').map(move |raw| {
        let start = offset;
        offset += raw.len();
        let line = raw.strip_suffix('\n').unwrap_or(raw);
        (start, line.strip_suffix('\r').unwrap_or(line))
    })
}

/// Each label line opens a span that runs until the next label line
fn split_at_labels<'a>(text: &'a str, label: &Regex) -> Vec<&'a str> {
    let starts: Vec<usize> = lines_with_offsets(text)
        .filter(|(_, line)| label.is_match(line))
        .map(|(start, _)| start)
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            text[start..end].trim()
        })
        .filter(|span| !span.is_empty())
        .collect()
}

fn split_paragraphs(text: &str) -> Vec<&str> {
    BLANK_LINES
        .split(text)
        .map(str::trim)
        .filter(|paragraph| paragraph.chars().count() >= MIN_PARAGRAPH_CHARS)
        .collect()
}

fn into_clauses(spans: Vec<&str>) -> Vec<Clause> {
    spans
        .into_iter()
        .enumerate()
        .map(|(index, span)| Clause {
            id: index as u32 + 1,
            text: span.to_string(),
            position: index as u32,
        })
        .collect()
}
