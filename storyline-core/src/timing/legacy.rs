//! Free-text timing ("Hour 6, Day 4, Month 3, Year 300").
//!
//! Each component is matched on its own, in any order, case-insensitively.

use std::sync::OnceLock;

use regex::Regex;

use super::ParsedTiming;

struct LegacyPatterns {
    hour: Regex,
    day: Regex,
    month: Regex,
    year: Regex,
}

impl LegacyPatterns {
    fn new() -> Self {
        Self {
            hour: Regex::new(r"(?i)\bhour\s+(\d+)").unwrap(),
            day: Regex::new(r"(?i)\bday\s+(\d+)").unwrap(),
            month: Regex::new(r"(?i)\bmonth\s+(\d+)").unwrap(),
            year: Regex::new(r"(?i)\byear\s+(-?\d+)").unwrap(),
        }
    }
}

fn patterns() -> &'static LegacyPatterns {
    static PATTERNS: OnceLock<LegacyPatterns> = OnceLock::new();
    PATTERNS.get_or_init(LegacyPatterns::new)
}

fn capture<T: std::str::FromStr>(pattern: &Regex, text: &str) -> Option<T> {
    pattern
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Parse legacy text. Months are written one-based and stored zero-based.
pub(super) fn parse(text: &str) -> Option<ParsedTiming> {
    let text = text.trim();
    let patterns = patterns();

    let parsed = ParsedTiming {
        hour: capture(&patterns.hour, text),
        day: capture(&patterns.day, text),
        month: capture::<u32>(&patterns.month, text).and_then(|m| m.checked_sub(1)),
        year: capture(&patterns.year, text),
        original_text: text.to_string(),
        ..ParsedTiming::default()
    };

    if parsed.is_unscheduled() {
        return None;
    }
    Some(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_and_year() {
        let parsed = parse("Month 3, Year 300").unwrap();
        assert_eq!(parsed.month, Some(2));
        assert_eq!(parsed.year, Some(300));
        assert_eq!(parsed.day, None);
        assert_eq!(parsed.hour, None);
        assert_eq!(parsed.original_text, "Month 3, Year 300");
    }

    #[test]
    fn test_single_field_is_enough() {
        let parsed = parse("Hour 5").unwrap();
        assert_eq!(parsed.hour, Some(5));
        assert_eq!(parsed.year, None);
    }

    #[test]
    fn test_garbage_fails() {
        assert_eq!(parse("garbage text"), None);
        assert_eq!(parse(""), None);
    }

    #[test]
    fn test_case_insensitive_any_order() {
        let parsed = parse("  year 12 / DAY 9 / hour 23 / month 12 ").unwrap();
        assert_eq!(parsed.year, Some(12));
        assert_eq!(parsed.day, Some(9));
        assert_eq!(parsed.hour, Some(23));
        assert_eq!(parsed.month, Some(11));
        assert_eq!(parsed.original_text, "year 12 / DAY 9 / hour 23 / month 12");
    }

    #[test]
    fn test_words_containing_day_do_not_match() {
        assert_eq!(parse("Monday 4"), None);
        assert_eq!(parse("Holiday 2, Year 5").unwrap().day, None);
    }

    #[test]
    fn test_negative_years_and_month_zero() {
        let parsed = parse("Month 0, Year -40").unwrap();
        assert_eq!(parsed.year, Some(-40));
        assert_eq!(parsed.month, None);
    }
}
