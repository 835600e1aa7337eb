use chrono::prelude::*;

use crate::error::{Error, Result};
use crate::model::Timestamp;

/// Inclusive `[start, end]` range, unbounded on a missing side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRange {
    start: Option<Timestamp>,
    end: Option<Timestamp>,
}

impl TimeRange {
    pub fn new(start: Option<Timestamp>, end: Option<Timestamp>) -> Result<Self> {
        if start.unwrap_or(Timestamp::MIN) > end.unwrap_or(Timestamp::MAX) {
            return Err("end time is before start time".into());
        }
        Ok(Self { start, end })
    }

    pub fn infinity() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    #[inline]
    pub fn start(&self) -> Option<Timestamp> {
        self.start
    }

    #[inline]
    pub fn contains(&self, ts: Timestamp) -> bool {
        self.start.map_or(true, |start| start <= ts) && self.end.map_or(true, |end| ts <= end)
    }
}

/// Parses an RFC 3339 time, e.g. `2021-01-01T00:00:00Z`.
pub fn parse_iso_time(s: &str) -> Result<Timestamp> {
    s.parse::<DateTime<Utc>>()
        .map(|t| t.timestamp_millis())
        .map_err(Error::from)
}
