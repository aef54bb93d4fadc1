//! Display formatting helpers shared by the TUI and CLI.
//!
//! These mirror the formatting contract of the recommender's web front end:
//! malformed input produces the sentinel strings `"Invalid Date"` / `"NaN"`
//! rather than an error.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate};
use regex::Regex;

/// Sentinel returned by [`format_date`] for unparseable input.
pub const INVALID_DATE: &str = "Invalid Date";

/// Sentinel returned by [`format_number`] for non-numeric input.
pub const NOT_A_NUMBER: &str = "NaN";

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

/// Returns true iff `text` looks like an email address: a non-empty,
/// whitespace-free local part, `@`, a domain containing a dot.
///
/// No normalization, no length limits, no internationalization.
pub fn validate_email(text: &str) -> bool {
    let re = EMAIL_RE
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));
    re.is_match(text)
}

/// Render a date string as e.g. "Jan 5, 2024".
///
/// Accepts RFC 3339 date-times, `YYYY-MM-DD` (the service's log format) and
/// `MM/DD/YYYY`. Anything else yields [`INVALID_DATE`].
pub fn format_date(text: &str) -> String {
    match parse_date(text.trim()) {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
            return Some(date);
        }
    }
    None
}

/// Render a numeric string with fixed decimal places; non-numeric input
/// yields [`NOT_A_NUMBER`].
pub fn format_number(text: &str, decimals: usize) -> String {
    match text.trim().parse::<f64>() {
        Ok(value) => format_f64(value, decimals),
        Err(_) => NOT_A_NUMBER.to_string(),
    }
}

/// Already-numeric variant of [`format_number`].
pub fn format_f64(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        NOT_A_NUMBER.to_string()
    } else {
        format!("{:.*}", decimals, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(validate_email("student@example.com"));
        assert!(validate_email("a.b+c@sub.example.co"));
        assert!(validate_email("x@y.z"));
    }

    #[test]
    fn rejects_missing_or_doubled_at() {
        assert!(!validate_email("studentexample.com"));
        assert!(!validate_email("a@@example.com"));
        assert!(!validate_email("a@b@c.com"));
    }

    #[test]
    fn rejects_whitespace_and_dotless_domains() {
        assert!(!validate_email("stu dent@example.com"));
        assert!(!validate_email("student@exa mple.com"));
        assert!(!validate_email("student@example"));
        assert!(!validate_email(""));
        assert!(!validate_email("@example.com"));
    }

    #[test]
    fn formats_iso_dates() {
        assert_eq!(format_date("2024-01-05"), "Jan 5, 2024");
        assert_eq!(format_date("2023-12-25"), "Dec 25, 2023");
        assert_eq!(format_date("2024-11-30"), "Nov 30, 2024");
    }

    #[test]
    fn formats_rfc3339_and_slash_dates() {
        assert_eq!(format_date("2024-01-05T08:30:00Z"), "Jan 5, 2024");
        assert_eq!(format_date("01/05/2024"), "Jan 5, 2024");
    }

    #[test]
    fn unparseable_dates_yield_sentinel() {
        assert_eq!(format_date("not a date"), INVALID_DATE);
        assert_eq!(format_date(""), INVALID_DATE);
        assert_eq!(format_date("2024-13-40"), INVALID_DATE);
    }

    #[test]
    fn formats_numbers_with_fixed_decimals() {
        assert_eq!(format_f64(3.14159, 2), "3.14");
        assert_eq!(format_number("3.14159", 2), "3.14");
        assert_eq!(format_number("7", 1), "7.0");
        assert_eq!(format_f64(2.5, 0), "2");
    }

    #[test]
    fn non_numeric_input_yields_nan() {
        assert_eq!(format_number("abc", 1), NOT_A_NUMBER);
        assert_eq!(format_number("", 1), NOT_A_NUMBER);
        assert_eq!(format_f64(f64::NAN, 1), NOT_A_NUMBER);
    }
}
