//! Shared utility functions for water-quality crates.

/// Date utility functions
pub mod dates {
    use crate::error::DateError;
    use chrono::{NaiveDate, NaiveDateTime};

    /// Date-time layouts seen in sensor exports, tried in order.
    pub const DATETIME_FORMATS: [&str; 7] = [
        "%m/%d/%Y %H:%M",
        "%m/%d/%Y %H:%M:%S",
        "%m/%d/%Y %I:%M:%S %p",
        "%m/%d/%Y %I:%M %p",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
    ];

    /// Date-only layouts; parsed values land on midnight.
    pub const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Parse a date string in any of [`DATE_FORMATS`]
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        let s = s.trim();
        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(s, format) {
                return Ok(date);
            }
        }
        anyhow::bail!("unrecognised date {:?}", s)
    }

    /// Parse a sensor timestamp, accepting any of [`DATETIME_FORMATS`] or a
    /// bare date from [`DATE_FORMATS`].
    pub fn parse_datetime(s: &str) -> Result<NaiveDateTime, DateError> {
        let s = s.trim();
        for format in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(dt);
            }
        }
        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(s, format) {
                return Ok(date.and_time(chrono::NaiveTime::MIN));
            }
        }
        Err(DateError(s.to_string()))
    }

}

/// Error types
pub mod error {
    use std::fmt;

    #[derive(Debug)]
    pub struct DateError(pub String);

    impl fmt::Display for DateError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Date error: unrecognized date-time {:?}", self.0)
        }
    }

    impl std::error::Error for DateError {}
}
