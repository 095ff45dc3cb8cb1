//! Millisecond timestamps
//!
//! The platform's collaborators all speak milliseconds-since-epoch, so the
//! client does too. [`TimeStamp`] is a thin ordered wrapper; formatting for
//! display lives with the views that need it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Milliseconds since the Unix epoch.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct TimeStamp(pub u64);

impl TimeStamp {
    /// The current wall-clock time.
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis().max(0) as u64)
    }

    /// Construct from raw milliseconds.
    pub fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// Raw milliseconds since the epoch.
    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Elapsed milliseconds between two stamps, saturating at zero.
    pub fn millis_since(&self, earlier: TimeStamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Convert to a UTC datetime, if representable.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.0 as i64)
    }
}

impl fmt::Display for TimeStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S%.3f UTC")),
            None => write!(f, "{}ms", self.0),
        }
    }
}

impl From<u64> for TimeStamp {
    fn from(ms: u64) -> Self {
        Self(ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_follows_millis() {
        assert!(TimeStamp::from_millis(5) < TimeStamp::from_millis(6));
    }

    #[test]
    fn test_millis_since_saturates() {
        let early = TimeStamp::from_millis(100);
        let late = TimeStamp::from_millis(250);
        assert_eq!(late.millis_since(early), 150);
        assert_eq!(early.millis_since(late), 0);
    }
}
