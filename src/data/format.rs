//! Text formatting for the summary slots.

use chrono::DateTime;

/// Group an integer with commas (e.g., 1234567 -> "1,234,567").
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a Unix timestamp as a long date, "Month D, YYYY", in UTC.
///
/// Timestamps outside chrono's range fall back to the raw seconds.
pub fn long_date(timestamp: u64) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

/// Format a millisecond timestamp as a short date, "Mon D, YYYY", in UTC.
pub fn short_date(timestamp_ms: u64) -> String {
    i64::try_from(timestamp_ms)
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .map(|dt| dt.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}

/// Format a percentage with one decimal and a percent sign.
pub fn percent(value: f64) -> String {
    format!("{:.1}%", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(18_234), "18,234");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_long_date() {
        assert_eq!(long_date(1_700_000_000), "November 14, 2023");
        assert_eq!(long_date(0), "January 1, 1970");
        assert_eq!(long_date(1_709_251_200), "March 1, 2024");
    }

    #[test]
    fn test_long_date_out_of_range() {
        assert_eq!(long_date(u64::MAX), u64::MAX.to_string());
    }

    #[test]
    fn test_short_date() {
        assert_eq!(short_date(1_700_000_000_000), "Nov 14, 2023");
        assert_eq!(short_date(u64::MAX), u64::MAX.to_string());
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(40.0), "40.0%");
        assert_eq!(percent(100.0), "100.0%");
        assert_eq!(percent(2.5), "2.5%");
    }
}
