use chrono::prelude::*;

// Unix timestamp in milliseconds.
pub type Timestamp = i64;

pub type SampleValue = f64;

/// Postgres time zero is 2000-01-01T00:00:00Z. This is the offset of the
/// Unix epoch in milliseconds from the Postgres zero.
pub const PG_UNIX_EPOCH: Timestamp = -946_684_800_000;

pub trait TimestampTrait {
    fn from_pg_millis(pg: Timestamp) -> Self;
    fn to_string_millis(&self) -> String;
}

impl TimestampTrait for Timestamp {
    #[inline]
    fn from_pg_millis(pg: Timestamp) -> Self {
        pg.saturating_sub(PG_UNIX_EPOCH)
    }

    fn to_string_millis(&self) -> String {
        match Utc.timestamp_millis_opt(*self).single() {
            Some(ts) => ts.format("%Y-%m-%dT%H:%M:%S%.3f").to_string(),
            None => self.to_string(),
        }
    }
}
