use chrono::Duration;
use std::fmt;

/// Sampling frequency of a time axis.
///
/// Only fixed-width steps are represented; calendar-sized steps (months,
/// years) have no fixed duration and cannot drive `date_range`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frequency {
    /// Every second
    Secondly,
    /// Every minute
    Minutely,
    /// Every hour
    Hourly,
    /// Every day
    Daily,
    /// Every week
    Weekly,
    /// Custom fixed step
    Custom(Duration),
}

impl Frequency {
    /// Parses a frequency string such as "D", "H" or "3D".
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "S" | "SEC" | "SECOND" | "SECONDS" => Some(Frequency::Secondly),
            "T" | "MIN" | "MINUTE" | "MINUTES" => Some(Frequency::Minutely),
            "H" | "HOUR" | "HOURS" => Some(Frequency::Hourly),
            "D" | "DAY" | "DAYS" | "DAILY" => Some(Frequency::Daily),
            "W" | "WEEK" | "WEEKS" | "WEEKLY" => Some(Frequency::Weekly),
            _ => parse_custom_frequency(s),
        }
    }

    /// The step between two consecutive grid points.
    pub fn to_duration(&self) -> Duration {
        match self {
            Frequency::Secondly => Duration::seconds(1),
            Frequency::Minutely => Duration::minutes(1),
            Frequency::Hourly => Duration::hours(1),
            Frequency::Daily => Duration::days(1),
            Frequency::Weekly => Duration::weeks(1),
            Frequency::Custom(duration) => *duration,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Secondly => write!(f, "S"),
            Frequency::Minutely => write!(f, "T"),
            Frequency::Hourly => write!(f, "H"),
            Frequency::Daily => write!(f, "D"),
            Frequency::Weekly => write!(f, "W"),
            Frequency::Custom(duration) => write!(f, "{}s", duration.num_seconds()),
        }
    }
}

/// Parses a "3D" / "2H" style custom step. The count must come first.
fn parse_custom_frequency(s: &str) -> Option<Frequency> {
    let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
    let unit = &s[digits.len()..];
    if digits.is_empty() || unit.is_empty() {
        return None;
    }

    let count: i64 = digits.parse().ok()?;
    match unit.to_uppercase().as_str() {
        "S" | "SEC" | "SECOND" | "SECONDS" => Some(Frequency::Custom(Duration::seconds(count))),
        "T" | "MIN" | "MINUTE" | "MINUTES" => Some(Frequency::Custom(Duration::minutes(count))),
        "H" | "HOUR" | "HOURS" => Some(Frequency::Custom(Duration::hours(count))),
        "D" | "DAY" | "DAYS" => Some(Frequency::Custom(Duration::days(count))),
        "W" | "WEEK" | "WEEKS" => Some(Frequency::Custom(Duration::weeks(count))),
        _ => None,
    }
}
