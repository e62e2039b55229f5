//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from unix seconds, falling back to the epoch for
    /// out-of-range values.
    pub fn from_unix_seconds(secs: i64) -> Self {
        Self(DateTime::from_timestamp(secs, 0).unwrap_or_default())
    }

    /// Returns unix seconds.
    pub fn unix_seconds(&self) -> i64 {
        self.0.timestamp()
    }

    /// Hour of day in UTC (0-23), used for daily cycle bucketing.
    pub fn hour_of_day(&self) -> u32 {
        self.0.hour()
    }

    /// Day of week, used for weekly cycle bucketing.
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}
