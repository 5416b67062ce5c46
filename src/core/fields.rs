//! Parse-or-default accessors for the free-text and JSON-encoded fields that
//! arrive on scraped job records. Every function here recovers from malformed
//! input by returning an empty/absent value; nothing panics or errors.

use once_cell::sync::Lazy;
use regex::Regex;

/// Spend strings that mean "no data" rather than "zero".
const NO_SPEND_SENTINEL: &str = "No spending history";

/// Rating strings that mean "no data".
const NO_RATING_SENTINEL: &str = "No ratings yet";

static SPEND_MILLIONS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\$?([\d.]+)M\+?").unwrap());
static SPEND_THOUSANDS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\$?([\d.]+)K\+?").unwrap());
static SPEND_LESS_THAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)Less than \$?([\d.]+)K").unwrap());
static SPEND_PLAIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$?([\d.]+)\+?").unwrap());
static RATING_OF_FIVE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([\d.]+)\s+of\s+5").unwrap());

/// Parse a JSON-array-encoded string list (e.g. the `skills` column).
///
/// Anything that is not a well-formed JSON array of strings becomes an empty
/// list. `None` and empty strings are treated the same way.
pub fn parse_string_list(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    if raw.trim().is_empty() {
        return Vec::new();
    }
    serde_json::from_str::<Vec<String>>(raw).unwrap_or_default()
}

/// Parse a client total-spent string into dollars.
///
/// Rules, first match wins:
/// - `$X M+`          -> X * 1,000,000
/// - `$X K+`          -> X * 1,000
/// - `Less than $X K` -> X * 500 (conservative half estimate)
/// - `$X+`            -> X
/// - empty / "No spending history" -> None
///
/// Note the `K` form is checked before "Less than", so "Less than $10K"
/// reads as $10,000, not the half estimate.
pub fn parse_client_spent(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == NO_SPEND_SENTINEL {
        return None;
    }

    if let Some(caps) = SPEND_MILLIONS.captures(trimmed) {
        if let Ok(value) = caps[1].parse::<f64>() {
            return Some(value * 1_000_000.0);
        }
    }

    if let Some(caps) = SPEND_THOUSANDS.captures(trimmed) {
        if let Ok(value) = caps[1].parse::<f64>() {
            return Some(value * 1_000.0);
        }
    }

    if let Some(caps) = SPEND_LESS_THAN.captures(trimmed) {
        if let Ok(value) = caps[1].parse::<f64>() {
            return Some(value * 500.0);
        }
    }

    if let Some(caps) = SPEND_PLAIN.captures(trimmed) {
        if let Ok(value) = caps[1].parse::<f64>() {
            return Some(value);
        }
    }

    None
}

/// Parse a client rating string of the form "X of 5" (optionally with a
/// "stars" suffix). Empty / "No ratings yet" -> None.
pub fn parse_client_rating(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == NO_RATING_SENTINEL {
        return None;
    }

    let caps = RATING_OF_FIVE.captures(trimmed)?;
    caps[1].parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_string_list() {
        assert_eq!(
            parse_string_list(Some(r#"["Python", "LangChain"]"#)),
            vec!["Python".to_string(), "LangChain".to_string()]
        );
        assert!(parse_string_list(Some("")).is_empty());
        assert!(parse_string_list(Some("not json")).is_empty());
        assert!(parse_string_list(Some("{\"a\": 1}")).is_empty());
        assert!(parse_string_list(None).is_empty());
    }

    #[test]
    fn test_parse_spent_millions() {
        assert_eq!(parse_client_spent("$1M+"), Some(1_000_000.0));
        assert_eq!(parse_client_spent("$2.5M+ spent"), Some(2_500_000.0));
    }

    #[test]
    fn test_parse_spent_thousands() {
        assert_eq!(parse_client_spent("$50K+"), Some(50_000.0));
        assert_eq!(parse_client_spent("$50K+ spent"), Some(50_000.0));
    }

    #[test]
    fn test_parse_spent_less_than_reads_as_thousands() {
        // The K rule fires first, so the face value wins over the half
        // estimate.
        assert_eq!(parse_client_spent("Less than $10K"), Some(10_000.0));
    }

    #[test]
    fn test_parse_spent_plain() {
        assert_eq!(parse_client_spent("$500+"), Some(500.0));
    }

    #[test]
    fn test_parse_spent_missing() {
        assert_eq!(parse_client_spent(""), None);
        assert_eq!(parse_client_spent("No spending history"), None);
        assert_eq!(parse_client_spent("   "), None);
    }

    #[test]
    fn test_parse_rating() {
        assert_eq!(parse_client_rating("4.9 of 5"), Some(4.9));
        assert_eq!(parse_client_rating("4.9 of 5 stars"), Some(4.9));
        assert_eq!(parse_client_rating("No ratings yet"), None);
        assert_eq!(parse_client_rating(""), None);
        assert_eq!(parse_client_rating("great client"), None);
    }
}
