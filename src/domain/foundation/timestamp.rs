//! UTC timestamps for trial windows and audit columns.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A point in time, fixed to UTC.
///
/// Trial boundaries compare timestamps directly, so the type carries a
/// total order. Nothing here reads the system clock except [`Timestamp::now`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// The current instant.
    ///
    /// Only the `Clock` port calls this; policy code takes an explicit
    /// `now` argument so trial checks stay deterministic under test.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Wraps a chrono datetime, as read from a TIMESTAMPTZ column.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Builds a timestamp from Unix seconds, saturating at chrono's
    /// maximum representable instant for out-of-range input.
    pub fn from_unix_secs(secs: u64) -> Self {
        let secs = i64::try_from(secs).unwrap_or(i64::MAX);
        Self(DateTime::from_timestamp(secs, 0).unwrap_or(DateTime::<Utc>::MAX_UTC))
    }

    pub fn as_unix_secs(&self) -> u64 {
        self.0.timestamp() as u64
    }

    /// The instant `days` later. Negative values move backwards.
    pub fn add_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// The instant `days` earlier.
    pub fn minus_days(&self, days: i64) -> Self {
        Self(self.0 - Duration::days(days))
    }

    /// The instant `secs` seconds later.
    pub fn plus_secs(&self, secs: u64) -> Self {
        Self(self.0 + Duration::seconds(secs as i64))
    }

    /// The instant `secs` seconds earlier.
    pub fn minus_secs(&self, secs: u64) -> Self {
        Self(self.0 - Duration::seconds(secs as i64))
    }
}
