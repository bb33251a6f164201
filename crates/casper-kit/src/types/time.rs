//! Timestamp and TTL types.
//!
//! Both are millisecond counts on the wire (`u64`, little-endian). In JSON a
//! [`Timestamp`] is an RFC 3339 string with millisecond precision and a
//! [`TimeDiff`] is a humanized duration such as `"30m"`, `"1h 30m"` or `"1day"`.

use std::fmt::{self, Display};
use std::str::FromStr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TimeError;

/// Milliseconds since the Unix epoch.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, BorshSerialize, BorshDeserialize,
)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Last millisecond of the year 9999, the latest instant RFC 3339 can express.
    pub const MAX_RFC3339: Timestamp = Timestamp(253_402_300_799_999);

    /// The current wall-clock time.
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        Self(millis)
    }

    /// Create from milliseconds since the Unix epoch.
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Milliseconds since the Unix epoch.
    pub const fn millis(&self) -> u64 {
        self.0
    }

    /// RFC 3339 text with millisecond precision, as used in JSON.
    pub fn to_rfc3339(&self) -> Result<String, TimeError> {
        if *self > Self::MAX_RFC3339 {
            return Err(TimeError::OutOfRange(self.0));
        }
        let time = UNIX_EPOCH + Duration::from_millis(self.0);
        Ok(humantime::format_rfc3339_millis(time).to_string())
    }
}

/// RFC 3339 text; instants past [`Timestamp::MAX_RFC3339`] print as a raw
/// millisecond count.
impl Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_rfc3339() {
            Ok(text) => f.write_str(&text),
            Err(_) => write!(f, "{}ms", self.0),
        }
    }
}

impl FromStr for Timestamp {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let time = humantime::parse_rfc3339_weak(s)
            .map_err(|e| TimeError::InvalidTimestamp(s.to_string(), e.to_string()))?;
        let since_epoch = time
            .duration_since(UNIX_EPOCH)
            .map_err(|e| TimeError::InvalidTimestamp(s.to_string(), e.to_string()))?;
        let millis = u64::try_from(since_epoch.as_millis()).map_err(|_| TimeError::Overflow)?;
        Ok(Self(millis))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let text = self.to_rfc3339().map_err(serde::ser::Error::custom)?;
        s.serialize_str(&text)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s: String = serde::Deserialize::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A span of time in milliseconds, used for deploy and transaction TTLs.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, BorshSerialize, BorshDeserialize,
)]
pub struct TimeDiff(u64);

impl TimeDiff {
    /// Create from milliseconds.
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Create from whole minutes.
    pub const fn from_minutes(minutes: u64) -> Self {
        Self(minutes * 60 * 1000)
    }

    /// The span in milliseconds.
    pub const fn millis(&self) -> u64 {
        self.0
    }
}

impl Display for TimeDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", humanize_ttl(self.0))
    }
}

impl FromStr for TimeDiff {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        dehumanize_ttl(s).map(Self)
    }
}

impl Serialize for TimeDiff {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimeDiff {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s: String = serde::Deserialize::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Formats a millisecond TTL the way nodes print it, e.g. `5400000` → `"1h 30m"`.
pub fn humanize_ttl(millis: u64) -> String {
    humantime::format_duration(Duration::from_millis(millis)).to_string()
}

/// Parses a humanized TTL back into milliseconds, e.g. `"1day"` → `86400000`.
pub fn dehumanize_ttl(ttl: &str) -> Result<u64, TimeError> {
    let duration = humantime::parse_duration(ttl)
        .map_err(|e| TimeError::InvalidTtl(ttl.to_string(), e.to_string()))?;
    u64::try_from(duration.as_millis()).map_err(|_| TimeError::Overflow)
}
