//! Centralized number formatting utilities.
//!
//! All numeric display formatting goes through this module so that statistic
//! values, suggestion text, and CLI rendering agree on how a number looks.

/// Format a large number with K/M suffix for compact display.
///
/// - Values >= 1,000,000 are formatted as `X.XXM`
/// - Values >= 1,000 are formatted as `X.XXK`
/// - Values below 1,000 are formatted as-is
///
/// # Examples
/// ```
/// use vantage_types::formatting::format_compact;
/// assert_eq!(format_compact(500), "500");
/// assert_eq!(format_compact(1_500), "1.50K");
/// assert_eq!(format_compact(15_000), "15.00K");
/// assert_eq!(format_compact(1_500_000), "1.50M");
/// ```
pub fn format_compact(n: i64) -> String {
    if n >= 1_000_000 {
        format!("{:.2}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.2}K", n as f64 / 1_000.0)
    } else {
        format!("{n}")
    }
}

/// Format a fraction (0.0..=1.0) as a percentage with 1 decimal place.
///
/// # Examples
/// ```
/// use vantage_types::formatting::format_percentage;
/// assert_eq!(format_percentage(0.427), "42.7%");
/// assert_eq!(format_percentage(0.0), "0.0%");
/// ```
pub fn format_percentage(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// Format a number with thousands separators.
///
/// - `1234567` becomes `1,234,567`
///
/// # Examples
/// ```
/// use vantage_types::formatting::format_thousands;
/// assert_eq!(format_thousands(500), "500");
/// assert_eq!(format_thousands(1_500), "1,500");
/// assert_eq!(format_thousands(-1_500_000), "-1,500,000");
/// ```
pub fn format_thousands(n: i64) -> String {
    let s = n.abs().to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    if n < 0 {
        result.insert(0, '-');
    }
    result
}

/// Format an encounter-relative duration in milliseconds as `M:SS`.
///
/// # Examples
/// ```
/// use vantage_types::formatting::format_duration;
/// assert_eq!(format_duration(0), "0:00");
/// assert_eq!(format_duration(83_000), "1:23");
/// assert_eq!(format_duration(600_500), "10:00");
/// ```
pub fn format_duration(millis: i64) -> String {
    let total_secs = millis.max(0) / 1000;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

/// Format a total accumulated over a duration as a per-second rate.
///
/// Returns `"0"` when the duration is zero so callers don't have to guard
/// against empty encounters.
///
/// # Examples
/// ```
/// use vantage_types::formatting::format_per_second;
/// assert_eq!(format_per_second(120_000, 60_000), "2.00K");
/// assert_eq!(format_per_second(100, 0), "0");
/// ```
pub fn format_per_second(total: i64, duration_millis: i64) -> String {
    if duration_millis <= 0 {
        return "0".to_string();
    }
    format_compact((total as f64 / (duration_millis as f64 / 1000.0)).round() as i64)
}
