//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Returns the duration from another timestamp to this one.
    ///
    /// Returns negative duration if other is after self.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// Creates a new timestamp by adding the specified number of days.
    ///
    /// Negative values subtract days.
    pub fn add_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// Creates a new timestamp by subtracting the specified number of days.
    pub fn minus_days(&self, days: i64) -> Self {
        Self(self.0 - Duration::days(days))
    }

    /// Creates a new timestamp offset by an arbitrary duration.
    pub fn plus(&self, duration: Duration) -> Self {
        Self(self.0 + duration)
    }

    /// Drops sub-millisecond precision, the precision records are stored at.
    pub fn truncated_to_millis(&self) -> Self {
        Self(self.0.trunc_subsecs(3))
    }

    /// RFC 3339 rendering with millisecond precision and a `Z` suffix.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn fixed() -> Timestamp {
        let dt = DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        Timestamp::from_datetime(dt)
    }

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn truncated_to_millis_drops_micro_and_nanoseconds() {
        let precise = Timestamp::from_datetime(
            DateTime::parse_from_rfc3339("2024-01-15T10:30:00.123456789Z")
                .unwrap()
                .with_timezone(&Utc),
        );
        let truncated = precise.truncated_to_millis();

        assert_eq!(truncated.to_rfc3339(), "2024-01-15T10:30:00.123Z");
        assert_eq!(truncated.as_datetime().timestamp_subsec_nanos(), 123_000_000);
        assert_eq!(truncated.truncated_to_millis(), truncated);

        let reparsed = DateTime::parse_from_rfc3339(&truncated.to_rfc3339())
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(Timestamp::from_datetime(reparsed), truncated);
    }

    #[test]
    fn timestamp_ordering_follows_add_and_minus_days() {
        let ts = fixed();
        assert!(ts.minus_days(1).is_before(&ts));
        assert!(ts.add_days(1).is_after(&ts));
        assert_eq!(ts.add_days(-3), ts.minus_days(3));
    }

    #[test]
    fn duration_since_is_signed() {
        let ts = fixed();
        assert_eq!(ts.add_days(30).duration_since(&ts), Duration::days(30));
        assert_eq!(ts.duration_since(&ts.add_days(30)), Duration::days(-30));
    }

    #[test]
    fn thirty_days_crosses_month_boundary() {
        let later = fixed().add_days(30);
        assert_eq!(later.as_datetime().month(), 2);
        assert_eq!(later.as_datetime().day(), 14);
    }

    #[test]
    fn timestamp_renders_rfc3339_with_z_suffix() {
        assert_eq!(fixed().to_rfc3339(), "2024-01-15T10:30:00.000Z");
        assert_eq!(fixed().to_string(), "2024-01-15T10:30:00.000Z");
    }

    #[test]
    fn timestamp_roundtrips_through_json() {
        let json = serde_json::to_string(&fixed()).unwrap();
        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, fixed());
    }
}
