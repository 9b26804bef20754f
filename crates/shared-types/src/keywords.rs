//! Validated keyword sets for violation patterns

use serde::{Deserialize, Serialize};

/// Ordered, de-duplicated set of lower-case keywords
///
/// Construction normalizes every entry (trim + lower-case) and drops empty
/// strings, so matching code never has to re-validate the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct KeywordSet(Vec<String>);

impl KeywordSet {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if !keyword.is_empty() && !normalized.contains(&keyword) {
                normalized.push(keyword);
            }
        }
        Self(normalized)
    }

    /// A set that can never produce a match
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Keywords contained in `lowered_text`, in set order.
    ///
    /// The caller lower-cases the text once per clause.
    pub fn found_in(&self, lowered_text: &str) -> Vec<String> {
        self.0
            .iter()
            .filter(|keyword| lowered_text.contains(keyword.as_str()))
            .cloned()
            .collect()
    }
}

impl From<Vec<String>> for KeywordSet {
    fn from(keywords: Vec<String>) -> Self {
        Self::new(keywords)
    }
}

impl From<KeywordSet> for Vec<String> {
    fn from(set: KeywordSet) -> Self {
        set.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalizes_case_and_whitespace() {
        let set = KeywordSet::new(["  Non-Compete ", "Restraint of Trade"]);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["non-compete", "restraint of trade"]);
    }

    #[test]
    fn test_drops_duplicates_and_blanks() {
        let set = KeywordSet::new(["forfeit", "", "FORFEIT", "   ", "penalty of"]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["forfeit", "penalty of"]);
    }

    #[test]
    fn test_found_in_preserves_set_order() {
        let set = KeywordSet::new(["without cause", "terminate at will", "cancel anytime"]);
        let found = set.found_in("client may terminate at will and without cause");
        assert_eq!(found, vec!["without cause", "terminate at will"]);
    }

    #[test]
    fn test_empty_set_never_matches() {
        assert!(KeywordSet::empty().found_in("anything at all").is_empty());
    }

    #[test]
    fn test_deserialize_normalizes() {
        let set: KeywordSet = serde_json::from_str(r#"["UK Jurisdiction", "uk jurisdiction"]"#).unwrap();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["uk jurisdiction"]);
    }
}
