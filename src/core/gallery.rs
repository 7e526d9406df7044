//! Search and sort over gallery entries.

use crate::core::transform::GalleryEntry;
use anyhow::anyhow;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    CodeAsc,
    CodeDesc,
    RateAsc,
    RateDesc,
}

impl Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SortKey::CodeAsc => "code",
                SortKey::CodeDesc => "code-desc",
                SortKey::RateAsc => "rate",
                SortKey::RateDesc => "rate-desc",
            }
        )
    }
}

impl FromStr for SortKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "code" | "code-asc" => Ok(SortKey::CodeAsc),
            "code-desc" => Ok(SortKey::CodeDesc),
            "rate" | "rate-asc" => Ok(SortKey::RateAsc),
            "rate-desc" => Ok(SortKey::RateDesc),
            _ => Err(anyhow!("Invalid sort key: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryFilter {
    pub search_term: String,
    pub sort_key: SortKey,
}

impl GalleryFilter {
    pub fn new(search_term: &str, sort_key: SortKey) -> Self {
        GalleryFilter {
            search_term: search_term.to_string(),
            sort_key,
        }
    }

    fn matches(&self, needle: &str, entry: &GalleryEntry) -> bool {
        needle.is_empty()
            || entry.code.as_str().to_lowercase().contains(needle)
            || entry.name.to_lowercase().contains(needle)
    }
}

/// Filters entries by code or name and sorts them.
///
/// Sorting is stable: entries that compare equal keep their input order.
pub fn apply(entries: &[GalleryEntry], filter: &GalleryFilter) -> Vec<GalleryEntry> {
    let needle = filter.search_term.trim().to_lowercase();
    let mut result: Vec<GalleryEntry> = entries
        .iter()
        .filter(|entry| filter.matches(&needle, entry))
        .cloned()
        .collect();

    match filter.sort_key {
        SortKey::CodeAsc => result.sort_by(|a, b| a.code.cmp(&b.code)),
        SortKey::CodeDesc => result.sort_by(|a, b| b.code.cmp(&a.code)),
        SortKey::RateAsc => result.sort_by(|a, b| a.rate.total_cmp(&b.rate)),
        SortKey::RateDesc => result.sort_by(|a, b| b.rate.total_cmp(&a.rate)),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(code: &str, name: &str, rate: f64) -> GalleryEntry {
        GalleryEntry {
            code: code.parse().unwrap(),
            name: name.to_string(),
            rate,
        }
    }

    fn sample() -> Vec<GalleryEntry> {
        vec![
            entry("USD", "United States Dollar", 1.1),
            entry("JPY", "Japanese Yen", 160.2),
            entry("GBP", "British Pound", 0.86),
            entry("CHF", "Swiss Franc", 0.94),
            entry("AUD", "Australian Dollar", 1.1),
        ]
    }

    fn codes(entries: &[GalleryEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.code.as_str()).collect()
    }

    #[test]
    fn test_empty_search_code_asc_returns_all_sorted() {
        let result = apply(&sample(), &GalleryFilter::default());
        assert_eq!(codes(&result), vec!["AUD", "CHF", "GBP", "JPY", "USD"]);
    }

    #[test]
    fn test_code_desc() {
        let result = apply(&sample(), &GalleryFilter::new("", SortKey::CodeDesc));
        assert_eq!(codes(&result), vec!["USD", "JPY", "GBP", "CHF", "AUD"]);
    }

    #[test]
    fn test_rate_sorts_are_stable() {
        let asc = apply(&sample(), &GalleryFilter::new("", SortKey::RateAsc));
        assert_eq!(codes(&asc), vec!["GBP", "CHF", "USD", "AUD", "JPY"]);

        let desc = apply(&sample(), &GalleryFilter::new("", SortKey::RateDesc));
        assert_eq!(codes(&desc), vec!["JPY", "USD", "AUD", "CHF", "GBP"]);
    }

    #[test]
    fn test_search_matches_code_or_name_ignoring_case() {
        let by_name = apply(&sample(), &GalleryFilter::new("dollar", SortKey::CodeAsc));
        assert_eq!(codes(&by_name), vec!["AUD", "USD"]);

        let by_code = apply(&sample(), &GalleryFilter::new("jp", SortKey::CodeAsc));
        assert_eq!(codes(&by_code), vec!["JPY"]);

        let none = apply(&sample(), &GalleryFilter::new("peso", SortKey::CodeAsc));
        assert!(none.is_empty());
    }

    #[test]
    fn test_apply_is_deterministic() {
        let filter = GalleryFilter::new("a", SortKey::RateDesc);
        assert_eq!(apply(&sample(), &filter), apply(&sample(), &filter));
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!("code".parse::<SortKey>().unwrap(), SortKey::CodeAsc);
        assert_eq!("RATE-DESC".parse::<SortKey>().unwrap(), SortKey::RateDesc);
        assert!("price".parse::<SortKey>().is_err());
        assert_eq!(SortKey::RateAsc.to_string(), "rate");
    }
}
