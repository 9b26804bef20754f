// Numeric extraction utilities for fair-practice checks
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// An integer immediately followed by "day" or "days"
    static ref DAY_COUNT_PATTERN: Regex = Regex::new(r"(?i)([0-9]+)\s*days?").unwrap();
}

/// Extracts the first day count in the text (e.g. "Net 90 days" -> 90)
///
/// Counts too large for a `u64` saturate instead of being ignored.
pub fn extract_day_count(text: &str) -> Option<u64> {
    let digits = DAY_COUNT_PATTERN.captures(text)?.get(1)?.as_str();
    Some(digits.parse().unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_day_count() {
        assert_eq!(extract_day_count("Payment due Net 90 days from invoice"), Some(90));
        assert_eq!(extract_day_count("payable within 120 DAYS"), Some(120));
        assert_eq!(extract_day_count("invoice settled in 45days"), Some(45));
        assert_eq!(extract_day_count("one day after delivery, 1 day grace"), Some(1));
    }

    #[test]
    fn test_first_count_wins() {
        assert_eq!(
            extract_day_count("Invoices within 15 days, disputes within 60 days"),
            Some(15)
        );
    }

    #[test]
    fn test_no_day_count() {
        assert_eq!(extract_day_count("Payment on Net 30 terms"), None);
        assert_eq!(extract_day_count(""), None);
    }

    #[test]
    fn test_huge_count_saturates() {
        assert_eq!(
            extract_day_count("payment within 99999999999999999999999 days"),
            Some(u64::MAX)
        );
    }
}
