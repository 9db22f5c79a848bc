// Parsing and formatting helpers.
//
// This module centralizes the "dirty" CSV value handling so the rest of
// the code can assume clean, typed values.
use chrono::NaiveDate;
use num_format::{Locale, ToFormattedString};

/// Parse a string-like value into `f64` while being forgiving about
/// formatting issues that are common in CSV exports (commas, spaces).
///
/// - Accepts `Option<&str>` so callers can pass through optional fields.
/// - Trims whitespace.
/// - Rejects values that contain alphabetic characters (e.g. `"N/A"`).
/// - Strips thousands separators like `","` before parsing.
/// - Returns `None` for anything that cannot be safely parsed; the
///   loader maps that to the 0.0 default.
pub fn parse_f64(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let s = s.replace(',', "");
    s.parse::<f64>().ok()
}

/// Parse a date strictly as `YYYY-MM-DD`. Impossible calendar dates
/// (e.g. `2024-13-45`) fail here too, not just malformed text.
pub fn parse_date(s: Option<&str>) -> Option<NaiveDate> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Format a value with a fixed number of decimal places and locale-aware
/// thousands separators (e.g. `1,234,567.89`). Non-finite values render
/// as the literal `NaN` so degenerate metrics stay visible in exports.
pub fn format_number(n: f64, decimals: usize) -> String {
    if !n.is_finite() {
        return "NaN".to_string();
    }
    let neg = n.is_sign_negative();
    let abs_n = n.abs();
    let s = format!("{:.*}", decimals, abs_n);
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if decimals > 0 {
        res.push('.');
        res.push_str(frac_part.unwrap_or(&"0".repeat(decimals)));
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

/// Format a ratio-valued metric: plain fixed decimals, no separators,
/// `NaN` for the division-by-zero sentinel.
pub fn format_ratio(n: f64, decimals: usize) -> String {
    if !n.is_finite() {
        return "NaN".to_string();
    }
    format!("{:.*}", decimals, n)
}

/// Thin wrapper around `num-format` for integer-like values, used for
/// counts in console messages (e.g. `9,855 rows loaded`).
pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_f64_accepts_thousands_separators() {
        assert_eq!(parse_f64(Some("1,234.5")), Some(1234.5));
    }

    #[test]
    fn test_parse_f64_rejects_text() {
        assert_eq!(parse_f64(Some("N/A")), None);
        assert_eq!(parse_f64(Some("")), None);
        assert_eq!(parse_f64(None), None);
    }

    #[test]
    fn test_parse_date_strict_format() {
        assert_eq!(
            parse_date(Some("2024-03-15")),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
        assert_eq!(parse_date(Some("15/03/2024")), None);
    }

    #[test]
    fn test_parse_date_rejects_impossible_calendar_dates() {
        assert_eq!(parse_date(Some("2024-13-45")), None);
    }

    #[test]
    fn test_format_number_groups_thousands() {
        assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number(30.0, 0), "30");
        assert_eq!(format_number(-42.5, 2), "-42.50");
    }

    #[test]
    fn test_format_number_renders_nan() {
        assert_eq!(format_number(f64::NAN, 2), "NaN");
    }

    #[test]
    fn test_format_ratio() {
        assert_eq!(format_ratio(0.15, 4), "0.1500");
        assert_eq!(format_ratio(f64::NAN, 4), "NaN");
    }
}
