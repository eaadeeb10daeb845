//! Timestamp display for history and comparison views. All times render
//! in UTC.

use chrono::{DateTime, NaiveDateTime, Utc};

pub const MISSING_TIMESTAMP: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampStyle {
    /// `2024-05-01 10:00:00`
    #[default]
    Long,
    /// `May 1, 10:00`
    Short,
    /// `5 minutes ago`
    Relative,
}

/// RFC 3339, or a naive ISO date-time taken as UTC.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Unparseable input is echoed back unchanged; empty input reads `N/A`.
pub fn format_timestamp(text: &str, style: TimestampStyle) -> String {
    format_timestamp_at(text, style, Utc::now())
}

pub fn format_timestamp_at(text: &str, style: TimestampStyle, now: DateTime<Utc>) -> String {
    if text.trim().is_empty() {
        return MISSING_TIMESTAMP.to_string();
    }
    let Some(at) = parse_timestamp(text) else {
        return text.to_string();
    };
    match style {
        TimestampStyle::Long => at.format("%Y-%m-%d %H:%M:%S").to_string(),
        TimestampStyle::Short => at.format("%b %-d, %H:%M").to_string(),
        TimestampStyle::Relative => format_relative(at, now),
    }
}

pub fn format_relative(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - at).num_seconds();
    let (magnitude, future) = (seconds.unsigned_abs(), seconds < 0);

    let phrase = match magnitude {
        0..=44 => "less than a minute".to_string(),
        45..=89 => "1 minute".to_string(),
        90..=2_669 => format!("{} minutes", (magnitude + 30) / 60),
        2_670..=5_369 => "about 1 hour".to_string(),
        5_370..=86_399 => format!("about {} hours", (magnitude + 1_800) / 3_600),
        86_400..=172_799 => "1 day".to_string(),
        172_800..=2_591_999 => format!("{} days", (magnitude + 43_200) / 86_400),
        2_592_000..=31_535_999 => plural((magnitude + 1_296_000) / 2_592_000, "month"),
        _ => plural(magnitude / 31_536_000, "year"),
    };

    if future {
        format!("in {phrase}")
    } else {
        format!("{phrase} ago")
    }
}

fn plural(count: u64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit}")
    } else {
        format!("{count} {unit}s")
    }
}
