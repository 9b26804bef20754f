//! Keyword groups and detection helpers for the fair-practice heuristics

/// Clauses that talk about getting paid
pub const PAYMENT_KEYWORDS: &[&str] = &["payment", "invoice"];

/// Clauses that talk about ending the engagement
pub const TERMINATION_KEYWORDS: &[&str] = &["terminate", "termination"];

/// Clauses that allocate liability
pub const LIABILITY_KEYWORDS: &[&str] = &["liability", "indemnify"];

/// Clauses that choose law or forum
pub const JURISDICTION_KEYWORDS: &[&str] = &["jurisdiction", "governed by"];

pub const IMMEDIATE_KEYWORD: &str = "immediate";

pub const UNLIMITED_KEYWORD: &str = "unlimited";

/// Forums that are foreign from the freelancer's point of view.
/// Matched case-sensitively as substrings, so "Singaporean courts" counts.
pub const FOREIGN_JURISDICTIONS: &[&str] = &[
    "USA",
    "United States",
    "UK",
    "United Kingdom",
    "Singapore",
    "Delaware",
    "California",
    "New York",
];

/// True if the already lower-cased text contains any keyword of the group
pub fn contains_any(text_lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text_lower.contains(keyword))
}

/// First listed foreign jurisdiction contained in the (original case) text
pub fn find_foreign_jurisdiction(text: &str) -> Option<&'static str> {
    FOREIGN_JURISDICTIONS
        .iter()
        .find(|name| text.contains(*name))
        .copied()
}
