//! Duration parsing, averaging, and formatting.
//!
//! Accepted entry formats:
//!
//! | Input | Meaning |
//! |-------|---------|
//! | `45`, `45.5`, `90` | seconds |
//! | `1:30`, `1:30.25` | minutes and seconds |
//! | `1:02:03` | hours, minutes, and seconds |
//!
//! Only the last field may carry a fraction, and every field after the first
//! must be below 60.

use std::time::Duration;

use thiserror::Error;

/// Most `:`-separated fields an entry may have (hours, minutes, seconds).
pub const MAX_FIELDS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimingError {
    #[error("Invalid time: input is empty.")]
    Empty,
    #[error("Invalid time {0:?}: negative durations are not allowed.")]
    Negative(String),
    #[error("Invalid time {0:?}: use SS, MM:SS or HH:MM:SS.")]
    TooManyFields(String),
    #[error("Invalid time {input:?}: {field:?} is not a number.")]
    InvalidField { input: String, field: String },
    #[error("Invalid time {input:?}: {field:?} must be below 60.")]
    FieldTooLarge { input: String, field: String },
    #[error("Invalid time {0:?}: duration is too large.")]
    TooLarge(String),
    #[error("Too many times entered; this one was not counted.")]
    TooManyEntries,
    #[error("No times entered.")]
    NoData,
}

/// Parse one duration entry.
pub fn parse_duration(input: &str) -> Result<Duration, TimingError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimingError::Empty);
    }
    if trimmed.starts_with('-') {
        return Err(TimingError::Negative(trimmed.to_string()));
    }

    let fields: Vec<&str> = trimmed.split(':').collect();
    if fields.len() > MAX_FIELDS {
        return Err(TimingError::TooManyFields(trimmed.to_string()));
    }

    let invalid = |field: &str| TimingError::InvalidField {
        input: trimmed.to_string(),
        field: field.to_string(),
    };

    let last = fields.len() - 1;
    let mut seconds = 0.0_f64;
    for (i, field) in fields.iter().copied().enumerate() {
        let allowed = |c: char| c.is_ascii_digit() || (i == last && c == '.');
        if field.is_empty() || !field.chars().all(allowed) {
            return Err(invalid(field));
        }
        let value: f64 = field.parse().map_err(|_| invalid(field))?;
        if i > 0 && value >= 60.0 {
            return Err(TimingError::FieldTooLarge {
                input: trimmed.to_string(),
                field: field.to_string(),
            });
        }
        seconds = seconds * 60.0 + value;
    }

    Duration::try_from_secs_f64(seconds).map_err(|_| TimingError::TooLarge(trimmed.to_string()))
}

/// Running sum and count of durations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeAverager {
    total: Duration,
    count: u32,
}

impl TimeAverager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an averager from a batch of durations.
    pub fn from_durations<I>(durations: I) -> Result<Self, TimingError>
    where
        I: IntoIterator<Item = Duration>,
    {
        let mut averager = Self::new();
        for d in durations {
            averager.add(d)?;
        }
        Ok(averager)
    }

    /// Add one duration. A full counter rejects the entry and leaves the
    /// averager unchanged.
    pub fn add(&mut self, duration: Duration) -> Result<(), TimingError> {
        let count = self.count.checked_add(1).ok_or(TimingError::TooManyEntries)?;
        self.total = self.total.saturating_add(duration);
        self.count = count;
        Ok(())
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    /// Mean of everything added so far. Empty input is [`TimingError::NoData`].
    pub fn mean(&self) -> Result<Duration, TimingError> {
        if self.count == 0 {
            return Err(TimingError::NoData);
        }
        Ok(self.total / self.count)
    }
}

/// Whole hundredths of a second, rounded to nearest. Both formatters start
/// here so they always agree on the displayed value.
fn centis(duration: Duration) -> u64 {
    (duration.as_secs_f64() * 100.0).round() as u64
}

/// Split a duration into (hours, minutes, seconds, hundredths).
fn clock_parts(duration: Duration) -> (u64, u64, u64, u64) {
    let centis = centis(duration);
    let secs = centis / 100;
    (secs / 3600, (secs % 3600) / 60, secs % 60, centis % 100)
}

/// Clock-style rendering: `M:SS` below an hour, `H:MM:SS` above, with
/// `.hh` appended only when there are hundredths.
pub fn format_duration(duration: Duration) -> String {
    let (h, m, s, cs) = clock_parts(duration);
    let mut out = if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    };
    if cs > 0 {
        out.push_str(&format!(".{cs:02}"));
    }
    out
}

/// Plain seconds: whole values without decimals, otherwise two decimals.
pub fn format_seconds(duration: Duration) -> String {
    let centis = centis(duration);
    let (secs, cs) = (centis / 100, centis % 100);
    if cs == 0 {
        format!("{secs}")
    } else {
        format!("{secs}.{cs:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn test_parse_plain_seconds() {
        assert_eq!(parse_duration("45"), Ok(Duration::from_secs(45)));
        assert_eq!(parse_duration(" 90 "), Ok(Duration::from_secs(90)));
        assert_eq!(parse_duration("12.5"), Ok(Duration::from_millis(12_500)));
    }

    #[test]
    fn test_parse_clock_formats() {
        assert_eq!(parse_duration("1:30"), Ok(Duration::from_secs(90)));
        assert_eq!(parse_duration("0:05.25"), Ok(Duration::from_millis(5_250)));
        assert_eq!(parse_duration("1:02:03"), Ok(Duration::from_secs(3723)));
        assert_eq!(parse_duration("90:00"), Ok(Duration::from_secs(5400)));
    }

    #[test]
    fn test_parse_rejects_bad_fields() {
        assert!(matches!(
            parse_duration("1:60"),
            Err(TimingError::FieldTooLarge { .. })
        ));
        assert!(matches!(
            parse_duration("1:75:00"),
            Err(TimingError::FieldTooLarge { .. })
        ));
        assert!(matches!(
            parse_duration("a:b"),
            Err(TimingError::InvalidField { .. })
        ));
        assert!(matches!(
            parse_duration("1.5:30"),
            Err(TimingError::InvalidField { .. })
        ));
        assert!(matches!(
            parse_duration("1::30"),
            Err(TimingError::InvalidField { .. })
        ));
        assert!(matches!(
            parse_duration("1.2.3"),
            Err(TimingError::InvalidField { .. })
        ));
        assert!(matches!(
            parse_duration("1:2:3:4"),
            Err(TimingError::TooManyFields(_))
        ));
        assert_eq!(parse_duration("-5"), Err(TimingError::Negative("-5".into())));
        assert_eq!(parse_duration("  "), Err(TimingError::Empty));
    }

    #[test]
    fn test_parse_rejects_overflow() {
        let huge = "9".repeat(40);
        assert_eq!(parse_duration(&huge), Err(TimingError::TooLarge(huge.clone())));
    }

    #[test]
    fn test_mean_of_three() {
        let averager =
            TimeAverager::from_durations([10, 20, 30].map(Duration::from_secs)).unwrap();
        assert_eq!(averager.count(), 3);
        assert_eq!(averager.mean(), Ok(Duration::from_secs(20)));
    }

    #[test]
    fn test_full_counter_rejects_entry() {
        let mut averager = TimeAverager {
            total: Duration::from_secs(7),
            count: u32::MAX,
        };
        assert_eq!(
            averager.add(Duration::from_secs(1)),
            Err(TimingError::TooManyEntries)
        );
        assert_eq!(averager.count(), u32::MAX);
        assert_eq!(averager.total(), Duration::from_secs(7));
    }

    #[test]
    fn test_empty_mean_is_no_data() {
        assert_eq!(TimeAverager::new().mean(), Err(TimingError::NoData));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(20)), "0:20");
        assert_eq!(format_duration(Duration::from_secs(95)), "1:35");
        assert_eq!(format_duration(Duration::from_secs(3723)), "1:02:03");
        assert_eq!(format_duration(secs(12.5)), "0:12.50");
        assert_eq!(format_duration(secs(59.999)), "1:00");
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(Duration::from_secs(20)), "20");
        assert_eq!(format_seconds(secs(12.5)), "12.50");
        assert_eq!(format_seconds(secs(0.05)), "0.05");
    }

    #[test]
    fn test_formats_agree_when_rounding_up() {
        let mean = secs(19.999);
        assert_eq!(format_duration(mean), "0:20");
        assert_eq!(format_seconds(mean), "20");
        assert_eq!(format_seconds(secs(59.996)), "60");
    }
}
