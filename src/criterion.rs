//! Comparison criteria and literal quoting
//!
//! A [`Criterion`] is one comparison in a WHERE clause: a key, a free-form
//! operator, and a typed [`Value`]. Rendering applies InfluxQL quoting:
//! keys are double-quoted, string values single-quoted, numbers and
//! booleans bare. The one exception is the `time` key compared against a
//! bare duration literal (`1535313431000ns`), where both sides are
//! emitted unquoted.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Matches a bare duration literal: digits with an optional unit suffix,
/// so plain epoch timestamps qualify too
static DURATION_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(ns|u|ms|s|m|h|d|w)?$").expect("duration literal pattern"));

/// A criterion value, resolved to a concrete type at the call site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Integer, rendered as bare decimal
    Integer(i64),
    /// Floating point, rendered in compact form (`30.5`, `30`)
    Float(f64),
    /// Boolean, rendered as bare `true`/`false`
    Bool(bool),
    /// Text, rendered single-quoted (string and time literals)
    Text(String),
}

impl Value {
    /// Render as a quoted query literal
    pub fn render_literal(&self) -> String {
        match self {
            Self::Integer(n) => n.to_string(),
            Self::Float(x) => x.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Text(s) => format!("'{}'", s),
        }
    }
}

impl std::fmt::Display for Value {
    /// Renders the bare text form, without quoting (used by `FILL(...)`)
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{}", n),
            Self::Float(x) => write!(f, "{}", x),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Integer(n as i64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Integer(n as i64)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        // Clamps above i64::MAX
        Self::Integer(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Self::Float(x as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// A single comparison in a WHERE clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    /// Field or tag key
    pub key: String,
    /// Comparison operator, free-form (`=`, `>`, `!=`, `=~`, ...)
    pub op: String,
    /// Value to compare against
    pub value: Value,
}

impl Criterion {
    /// Create a new criterion
    pub fn new(key: impl Into<String>, op: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            op: op.into(),
            value: value.into(),
        }
    }

    /// Render as a query fragment, e.g. `"temperature" > 30`
    ///
    /// The key is double-quoted and the value quoted per its type, except
    /// for `time` compared against a bare duration literal, where both
    /// sides are emitted unquoted: `time < 1535313431000ns`.
    pub fn render(&self) -> String {
        if self.key == "time" {
            if let Value::Text(raw) = &self.value {
                if DURATION_LITERAL.is_match(raw) {
                    return format!("{} {} {}", self.key, self.op, raw);
                }
            }
        }

        format!("\"{}\" {} {}", self.key, self.op, self.value.render_literal())
    }
}

impl std::fmt::Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_value_unquoted() {
        assert_eq!(Criterion::new("temperature", ">", 30).render(), "\"temperature\" > 30");
    }

    #[test]
    fn test_unsigned_value_unquoted() {
        assert_eq!(Criterion::new("count", "=", 10u64).render(), "\"count\" = 10");
        // Magnitudes beyond i64 clamp rather than wrap
        assert_eq!(
            Value::from(u64::MAX).render_literal(),
            i64::MAX.to_string()
        );
    }

    #[test]
    fn test_float_value_compact() {
        assert_eq!(Criterion::new("humidity", "<", 10.5).render(), "\"humidity\" < 10.5");
        // A whole float prints without a trailing ".0"
        assert_eq!(Criterion::new("humidity", "<", 10.0).render(), "\"humidity\" < 10");
    }

    #[test]
    fn test_bool_value_bare() {
        assert_eq!(Criterion::new("hot", "=", true).render(), "\"hot\" = true");
        assert_eq!(Criterion::new("hot", "=", false).render(), "\"hot\" = false");
    }

    #[test]
    fn test_string_value_single_quoted() {
        assert_eq!(Criterion::new("city", "=", "paris").render(), "\"city\" = 'paris'");
    }

    #[test]
    fn test_time_with_duration_literal_unquoted() {
        assert_eq!(
            Criterion::new("time", "<", "1535313431000ns").render(),
            "time < 1535313431000ns"
        );
        assert_eq!(Criterion::new("time", ">", "10m").render(), "time > 10m");
    }

    #[test]
    fn test_time_with_bare_epoch_unquoted() {
        assert_eq!(
            Criterion::new("time", "<", "1535313431000").render(),
            "time < 1535313431000"
        );
    }

    #[test]
    fn test_time_with_timestamp_string_quoted() {
        assert_eq!(
            Criterion::new("time", "<", "2018-11-02T09:35:25Z").render(),
            "\"time\" < '2018-11-02T09:35:25Z'"
        );
    }

    #[test]
    fn test_non_time_key_with_duration_shape_stays_quoted() {
        assert_eq!(Criterion::new("window", "=", "10m").render(), "\"window\" = '10m'");
    }

    #[test]
    fn test_fill_display_is_bare() {
        assert_eq!(Value::from("linear").to_string(), "linear");
        assert_eq!(Value::from(0).to_string(), "0");
    }
}
