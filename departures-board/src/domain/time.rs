//! Departure time normalization.
//!
//! The scraped feeds carry times as display strings: bare 4-digit `HHMM`
//! tokens, `HH:MM`, or free-text snippets like "Expected at 1437". This
//! module turns those into calendar-anchored times. Everything is anchored
//! to the date supplied by the caller (the current day at generation time);
//! departures past midnight land on the wrong date, a known limitation.

use chrono::{Duration, NaiveDate, NaiveTime, Timelike};
use std::cmp::Ordering;
use std::fmt;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A departure time pinned to a calendar date.
///
/// Scheduled and expected times within one record always share the same
/// date, so their difference is a plain wall-clock delta.
///
/// # Examples
///
/// ```
/// use departures_board::domain::BoardTime;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
/// let t = BoardTime::parse_compact("1430", date).unwrap();
/// assert_eq!(t.to_string(), "14:30");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardTime {
    date: NaiveDate,
    time: NaiveTime,
}

impl BoardTime {
    /// Create from date and time components.
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self { date, time }
    }

    /// Parse a time from strict "HH:MM" format with a given base date.
    pub fn parse_hhmm(s: &str, date: NaiveDate) -> Result<Self, TimeError> {
        let bytes = s.as_bytes();

        if bytes.len() != 5 {
            return Err(TimeError::new("expected HH:MM format"));
        }
        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;

        Self::from_hm(hour, minute, date)
    }

    /// Parse a time from compact "HHMM" format (exactly 4 ASCII digits).
    pub fn parse_compact(s: &str, date: NaiveDate) -> Result<Self, TimeError> {
        let bytes = s.as_bytes();

        if bytes.len() != 4 {
            return Err(TimeError::new("expected HHMM format"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        let minute = parse_two_digits(&bytes[2..4])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;

        Self::from_hm(hour, minute, date)
    }

    fn from_hm(hour: u32, minute: u32, date: NaiveDate) -> Result<Self, TimeError> {
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let time = NaiveTime::from_hms_opt(hour, minute, 0)
            .ok_or_else(|| TimeError::new("invalid time"))?;

        Ok(Self { date, time })
    }

    /// Returns the date component.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the time component.
    pub fn time(&self) -> NaiveTime {
        self.time
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.time.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.time.minute()
    }

    /// Returns the duration between two times.
    ///
    /// Negative if `other` is after `self`.
    pub fn signed_duration_since(&self, other: Self) -> Duration {
        self.date
            .and_time(self.time)
            .signed_duration_since(other.date.and_time(other.time))
    }
}

impl Ord for BoardTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.date
            .and_time(self.time)
            .cmp(&other.date.and_time(other.time))
    }
}

impl PartialOrd for BoardTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for BoardTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BoardTime({} {:02}:{:02})",
            self.date,
            self.hour(),
            self.minute()
        )
    }
}

impl fmt::Display for BoardTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

/// Parse a scheduled departure token: either compact "HHMM" or "HH:MM".
///
/// A record whose scheduled time fails here is dropped by the extractors.
pub fn parse_scheduled(raw: &str, date: NaiveDate) -> Result<BoardTime, TimeError> {
    if raw.len() == 4 {
        BoardTime::parse_compact(raw, date)
    } else {
        BoardTime::parse_hhmm(raw, date)
    }
}

/// Normalize an expected-departure token, falling back to the scheduled
/// time when no real-time estimate can be read out of it.
///
/// In priority order:
/// 1. an exact 4-digit token ("1437");
/// 2. text containing "Expected at": the last whitespace-separated token,
///    if it is a valid 4-digit time;
/// 3. an "HH:MM"-shaped token;
/// 4. anything else reads as on time.
///
/// # Examples
///
/// ```
/// use departures_board::domain::{BoardTime, parse_expected};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
/// let sched = BoardTime::parse_compact("1430", date).unwrap();
///
/// let exp = parse_expected("Expected at 1437", sched);
/// assert_eq!(exp.to_string(), "14:37");
///
/// // Unreadable estimates degrade to the scheduled time
/// assert_eq!(parse_expected("Cancelled", sched), sched);
/// ```
pub fn parse_expected(raw: &str, scheduled: BoardTime) -> BoardTime {
    let date = scheduled.date();

    if raw.len() == 4 {
        if let Ok(t) = BoardTime::parse_compact(raw, date) {
            return t;
        }
    }

    if raw.contains("Expected at") {
        if let Some(token) = raw.split_whitespace().last() {
            if let Ok(t) = BoardTime::parse_compact(token, date) {
                return t;
            }
        }
        return scheduled;
    }

    if let Ok(t) = BoardTime::parse_hhmm(raw, date) {
        return t;
    }

    scheduled
}
