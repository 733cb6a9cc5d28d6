//! Years-of-experience extraction from free-text snippets.

use std::sync::OnceLock;

use regex::Regex;

/// Explicit counts first, then year ranges. Every match of every pattern counts.
const YEAR_PATTERNS: &[&str] = &[
    r"(\d+)\s*years?",
    r"(\d+)\s*yrs?",
    r"(\d{4})\s*-\s*(\d{4})",
    r"(\d{4})\s*to\s*(\d{4})",
];

fn patterns() -> &'static [Regex] {
    static COMPILED: OnceLock<Vec<Regex>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        YEAR_PATTERNS
            .iter()
            .map(|p| Regex::new(p).expect("static regex"))
            .collect()
    })
}

/// Sum of all year counts and ranges mentioned in `text`.
///
/// A range contributes `max(0, end - start)`. Captures that do not parse as
/// integers are skipped.
pub fn extract_years(text: &str) -> u32 {
    let lower = text.to_lowercase();
    let mut total: u32 = 0;
    for pattern in patterns() {
        for caps in pattern.captures_iter(&lower) {
            let years = match (caps.get(1), caps.get(2)) {
                (Some(start), Some(end)) => {
                    match (start.as_str().parse::<u32>(), end.as_str().parse::<u32>()) {
                        (Ok(start), Ok(end)) => end.saturating_sub(start),
                        _ => continue,
                    }
                }
                (Some(count), None) => match count.as_str().parse::<u32>() {
                    Ok(count) => count,
                    Err(_) => continue,
                },
                _ => continue,
            };
            total = total.saturating_add(years);
        }
    }
    total
}

/// Total years across all snippets.
pub fn total_years<S: AsRef<str>>(snippets: &[S]) -> u32 {
    snippets
        .iter()
        .map(|s| extract_years(s.as_ref()))
        .fold(0, u32::saturating_add)
}

/// True if the snippet mentions any year count or range.
pub fn mentions_years(text: &str) -> bool {
    let lower = text.to_lowercase();
    patterns().iter().any(|p| p.is_match(&lower))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_years() {
        assert_eq!(extract_years("5 years of experience"), 5);
        assert_eq!(extract_years("1 year at Acme"), 1);
        assert_eq!(extract_years("3yrs backend, 2 yr frontend"), 5);
    }

    #[test]
    fn test_year_ranges() {
        assert_eq!(extract_years("2019-2022"), 3);
        assert_eq!(extract_years("2015 - 2018"), 3);
        assert_eq!(extract_years("2010 to 2020"), 10);
    }

    #[test]
    fn test_reversed_range_contributes_zero() {
        assert_eq!(extract_years("2022-2019"), 0);
    }

    #[test]
    fn test_snippets_are_summed() {
        let snippets = ["5 years of experience", "2019-2022"];
        assert_eq!(total_years(&snippets), 8);
    }

    #[test]
    fn test_overflowing_capture_is_skipped() {
        assert_eq!(extract_years("99999999999999999999 years, 4 years"), 4);
    }

    #[test]
    fn test_no_mentions() {
        assert_eq!(extract_years("Led a team of engineers"), 0);
        assert!(!mentions_years("Led a team of engineers"));
        assert!(mentions_years("Acme Corp 2018 - 2021"));
    }
}
