//! # Expiry
//!
//! Time-to-live forms accepted by the facade. A TTL can be given as a plain
//! [`Duration`], as an amount of some [`TimeUnit`], or as an absolute instant.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{CacheError, Result};

/// Unit for the (amount, unit) TTL form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    /// Convert `amount` of this unit into a [`Duration`], saturating on overflow.
    #[must_use]
    pub const fn to_duration(self, amount: u64) -> Duration {
        match self {
            Self::Nanoseconds => Duration::from_nanos(amount),
            Self::Microseconds => Duration::from_micros(amount),
            Self::Milliseconds => Duration::from_millis(amount),
            Self::Seconds => Duration::from_secs(amount),
            Self::Minutes => Duration::from_secs(amount.saturating_mul(60)),
            Self::Hours => Duration::from_secs(amount.saturating_mul(3_600)),
            Self::Days => Duration::from_secs(amount.saturating_mul(86_400)),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nanoseconds => "ns",
            Self::Microseconds => "us",
            Self::Milliseconds => "ms",
            Self::Seconds => "s",
            Self::Minutes => "m",
            Self::Hours => "h",
            Self::Days => "d",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known [`TimeUnit`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown time unit '{0}' (expected ns, us, ms, s, m, h or d)")]
pub struct ParseTimeUnitError(pub String);

impl FromStr for TimeUnit {
    type Err = ParseTimeUnitError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ns" | "nanos" | "nanoseconds" => Ok(Self::Nanoseconds),
            "us" | "micros" | "microseconds" => Ok(Self::Microseconds),
            "ms" | "millis" | "milliseconds" => Ok(Self::Milliseconds),
            "s" | "sec" | "secs" | "seconds" => Ok(Self::Seconds),
            "m" | "min" | "mins" | "minutes" => Ok(Self::Minutes),
            "h" | "hour" | "hours" => Ok(Self::Hours),
            "d" | "day" | "days" => Ok(Self::Days),
            _ => Err(ParseTimeUnitError(s.to_string())),
        }
    }
}

/// When a cache entry should be removed by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expiry {
    /// Keep until deleted. Overwriting with `Never` clears an earlier TTL.
    #[default]
    Never,
    /// Expire once the duration has elapsed.
    After(Duration),
    /// Expire at an absolute instant.
    At(DateTime<Utc>),
}

impl Expiry {
    /// The (amount, unit) form, e.g. `Expiry::after(30, TimeUnit::Minutes)`.
    #[must_use]
    pub const fn after(amount: u64, unit: TimeUnit) -> Self {
        Self::After(unit.to_duration(amount))
    }

    /// Reject TTLs the store would refuse or that would expire on arrival.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<()> {
        match self {
            Self::Never => Ok(()),
            Self::After(ttl) if ttl.is_zero() => Err(CacheError::InvalidExpiry(
                "TTL must be greater than zero".to_string(),
            )),
            Self::After(_) => Ok(()),
            Self::At(at) if *at <= now => Err(CacheError::InvalidExpiry(format!(
                "expiry instant {} is not in the future",
                at.to_rfc3339()
            ))),
            Self::At(_) => Ok(()),
        }
    }

    /// Relative TTL in whole milliseconds, rounded up so that a non-zero
    /// duration never becomes zero.
    #[must_use]
    pub fn ttl_millis(&self) -> Option<u64> {
        match self {
            Self::After(ttl) => {
                let millis = ttl.as_nanos().div_ceil(1_000_000);
                Some(u64::try_from(millis).unwrap_or(u64::MAX))
            }
            _ => None,
        }
    }

    /// Absolute deadline as Unix milliseconds.
    #[must_use]
    pub fn deadline_millis(&self) -> Option<i64> {
        match self {
            Self::At(at) => Some(at.timestamp_millis()),
            _ => None,
        }
    }
}

impl From<Duration> for Expiry {
    fn from(ttl: Duration) -> Self {
        Self::After(ttl)
    }
}

impl From<Option<Duration>> for Expiry {
    fn from(ttl: Option<Duration>) -> Self {
        ttl.map_or(Self::Never, Self::After)
    }
}

impl From<DateTime<Utc>> for Expiry {
    fn from(at: DateTime<Utc>) -> Self {
        Self::At(at)
    }
}
