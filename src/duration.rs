//! Duration tokens for GROUP BY time windows
//!
//! A [`Duration`] pairs a non-negative magnitude with one of the eight
//! InfluxQL time units and renders the canonical window token, e.g.
//! `Duration::minutes(10)` renders as `time(10m)`.

use serde::{Deserialize, Serialize};

/// InfluxQL time units and their canonical suffixes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    /// Nanoseconds (`ns`)
    Nanoseconds,
    /// Microseconds (`u`)
    Microseconds,
    /// Milliseconds (`ms`)
    Milliseconds,
    /// Seconds (`s`)
    Seconds,
    /// Minutes (`m`)
    Minutes,
    /// Hours (`h`)
    Hours,
    /// Days (`d`)
    Days,
    /// Weeks (`w`)
    Weeks,
}

impl TimeUnit {
    /// Canonical unit suffix as it appears in a duration literal
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Nanoseconds => "ns",
            Self::Microseconds => "u",
            Self::Milliseconds => "ms",
            Self::Seconds => "s",
            Self::Minutes => "m",
            Self::Hours => "h",
            Self::Days => "d",
            Self::Weeks => "w",
        }
    }
}

impl std::fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

/// A time-window duration: one magnitude, one unit
///
/// A duration holds exactly one magnitude/unit pair. Constructing a new
/// duration is how the pair is replaced; there is no accumulation across
/// units. Any non-negative magnitude is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Duration {
    magnitude: u64,
    unit: TimeUnit,
}

impl Duration {
    /// Create a duration with an explicit unit
    pub fn new(magnitude: u64, unit: TimeUnit) -> Self {
        Self { magnitude, unit }
    }

    /// A duration of `n` nanoseconds
    pub fn nanoseconds(n: u64) -> Self {
        Self::new(n, TimeUnit::Nanoseconds)
    }

    /// A duration of `n` microseconds
    pub fn microseconds(n: u64) -> Self {
        Self::new(n, TimeUnit::Microseconds)
    }

    /// A duration of `n` milliseconds
    pub fn milliseconds(n: u64) -> Self {
        Self::new(n, TimeUnit::Milliseconds)
    }

    /// A duration of `n` seconds
    pub fn seconds(n: u64) -> Self {
        Self::new(n, TimeUnit::Seconds)
    }

    /// A duration of `n` minutes
    pub fn minutes(n: u64) -> Self {
        Self::new(n, TimeUnit::Minutes)
    }

    /// A duration of `n` hours
    pub fn hours(n: u64) -> Self {
        Self::new(n, TimeUnit::Hours)
    }

    /// A duration of `n` days
    pub fn days(n: u64) -> Self {
        Self::new(n, TimeUnit::Days)
    }

    /// A duration of `n` weeks
    pub fn weeks(n: u64) -> Self {
        Self::new(n, TimeUnit::Weeks)
    }

    /// The magnitude part
    pub fn magnitude(&self) -> u64 {
        self.magnitude
    }

    /// The unit part
    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// The bare interval token, e.g. `10m`
    pub fn interval(&self) -> String {
        format!("{}{}", self.magnitude, self.unit.suffix())
    }
}

impl std::fmt::Display for Duration {
    /// Renders the GROUP BY window token, e.g. `time(10m)`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "time({})", self.interval())
    }
}
