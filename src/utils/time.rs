use chrono::{DateTime, Local, TimeZone};

/// Current local time as ISO-8601 without offset, microsecond precision.
pub fn iso_timestamp() -> String {
    format_iso(&Local::now())
}

pub fn format_iso<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

/// 12-hour wall clock, e.g. `03:07 PM`.
pub fn format_clock<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%I:%M %p").to_string()
}

/// Rounds to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
