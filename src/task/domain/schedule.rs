//! Validated scheduling types: preferred window, time of day, proposed slot.

use super::TaskDomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Client's desired service window.
///
/// The end never precedes the start; the constructor rejects inverted
/// windows so downstream code can rely on the ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateWindow {
    /// Creates a validated window.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDateWindow`] when `end` precedes
    /// `start`. A zero-length window (start equal to end) is allowed.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, TaskDomainError> {
        if end < start {
            return Err(TaskDomainError::InvalidDateWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns the window start.
    #[must_use]
    pub const fn start(self) -> DateTime<Utc> {
        self.start
    }

    /// Returns the window end.
    #[must_use]
    pub const fn end(self) -> DateTime<Utc> {
        self.end
    }
}

/// Validated wall-clock time in `HH:MM` 24-hour format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeOfDay(String);

impl TimeOfDay {
    /// Creates a validated time of day.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTimeOfDay`] when the value is not
    /// a zero-padded `HH:MM` within 00:00..=23:59.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        let is_valid = normalized.split_once(':').is_some_and(|(hours, minutes)| {
            hours.len() == 2
                && minutes.len() == 2
                && hours.parse::<u8>().is_ok_and(|h| h < 24)
                && minutes.parse::<u8>().is_ok_and(|m| m < 60)
        });

        if !is_valid {
            return Err(TaskDomainError::InvalidTimeOfDay(raw));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the fallback start-of-day slot used when a contractor
    /// accepts a task without a prior proposal.
    #[must_use]
    pub fn default_start() -> Self {
        Self("09:00".to_owned())
    }

    /// Returns the time as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TimeOfDay {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Contractor's offered visit slot.
///
/// The date and time always travel together; a task either carries a full
/// slot or none at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedSlot {
    date: DateTime<Utc>,
    time: TimeOfDay,
}

impl ProposedSlot {
    /// Creates a proposed slot.
    #[must_use]
    pub const fn new(date: DateTime<Utc>, time: TimeOfDay) -> Self {
        Self { date, time }
    }

    /// Returns the offered visit date.
    #[must_use]
    pub const fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Returns the offered visit time.
    #[must_use]
    pub const fn time(&self) -> &TimeOfDay {
        &self.time
    }
}

impl fmt::Display for ProposedSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.date.format("%Y-%m-%d"), self.time)
    }
}
