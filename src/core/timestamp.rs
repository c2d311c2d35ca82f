//! Timestamp formatting for the `{time}` placeholder
//!
//! Timestamps are rendered from the local wall clock with a strftime pattern.
//! Patterns are validated up front so a bad pattern is reported when it is
//! configured rather than when the first line is written.

use super::defaults::DEFAULT_TIME_FORMAT;
use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated strftime pattern
///
/// # Examples
///
/// ```
/// use multistream_logger::core::TimeFormat;
///
/// let format = TimeFormat::new("%Y-%m-%d").unwrap();
/// assert_eq!(format.as_str(), "%Y-%m-%d");
///
/// assert!(TimeFormat::new("%Y-%Q").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeFormat(String);

impl TimeFormat {
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(LoggerError::formatter(
                "time",
                format!("'{}' is not a valid strftime pattern", pattern),
            ));
        }
        Ok(Self(pattern))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn format<Tz: TimeZone>(&self, datetime: &DateTime<Tz>) -> String
    where
        Tz::Offset: fmt::Display,
    {
        datetime.format(&self.0).to_string()
    }

    /// Current local time in this format
    #[must_use]
    pub fn now(&self) -> String {
        self.format(&Local::now())
    }
}

impl Default for TimeFormat {
    fn default() -> Self {
        Self(DEFAULT_TIME_FORMAT.to_string())
    }
}

impl TryFrom<String> for TimeFormat {
    type Error = LoggerError;

    fn try_from(pattern: String) -> Result<Self> {
        Self::new(pattern)
    }
}

impl From<TimeFormat> for String {
    fn from(format: TimeFormat) -> Self {
        format.0
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn fixed_datetime() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
    }

    #[test]
    fn test_default_format() {
        let format = TimeFormat::default();
        assert_eq!(format.format(&fixed_datetime()), "08/01/2025 10:30:45");
    }

    #[test]
    fn test_custom_format() {
        let format = TimeFormat::new("%Y/%m/%d %H:%M").unwrap();
        assert_eq!(format.format(&fixed_datetime()), "2025/01/08 10:30");
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let err = TimeFormat::new("%").unwrap_err();
        assert!(matches!(err, LoggerError::FormatterError { .. }));
    }

    #[test]
    fn test_now_uses_pattern() {
        let format = TimeFormat::new("%Y").unwrap();
        let year = format.now();
        assert_eq!(year.len(), 4);
        assert!(year.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_deserialization_validates() {
        let format: TimeFormat = serde_json::from_str("\"%H:%M\"").expect("deserialize");
        assert_eq!(format.as_str(), "%H:%M");

        assert!(serde_json::from_str::<TimeFormat>("\"%Q\"").is_err());
    }
}
