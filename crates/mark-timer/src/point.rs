use serde_json::Value;

use crate::error::{Result, TimerError};
use crate::mark::Mark;

/// Anything that can be resolved to a raw timestamp for [`Timer::diff`](crate::Timer::diff)
#[derive(Debug, Clone, PartialEq)]
pub enum TimePoint {
    /// Storage key of a recorded mark
    Key(String),
    /// Raw timestamp, used as-is
    Timestamp(f64),
    /// A mark, possibly from another timer
    Mark(Mark),
    /// Loosely typed point: string key, number, or object with a `timestamp` field
    Value(Value),
}

impl TimePoint {
    /// Resolve to a timestamp, looking keys up through `lookup`.
    pub fn resolve<F>(&self, lookup: F) -> Result<f64>
    where
        F: Fn(&str) -> Option<f64>,
    {
        match self {
            TimePoint::Key(key) => resolve_key(key, &lookup),
            TimePoint::Timestamp(ts) => Ok(*ts),
            TimePoint::Mark(mark) => Ok(mark.timestamp),
            TimePoint::Value(value) => match value {
                Value::String(key) => resolve_key(key, &lookup),
                Value::Number(n) => n.as_f64().ok_or(TimerError::InvalidArgument { kind: "number" }),
                Value::Object(fields) => fields
                    .get("timestamp")
                    .and_then(Value::as_f64)
                    .ok_or(TimerError::InvalidMark),
                Value::Null => Err(TimerError::InvalidArgument { kind: "null" }),
                Value::Bool(_) => Err(TimerError::InvalidArgument { kind: "bool" }),
                Value::Array(_) => Err(TimerError::InvalidArgument { kind: "array" }),
            },
        }
    }
}

fn resolve_key<F>(key: &str, lookup: &F) -> Result<f64>
where
    F: Fn(&str) -> Option<f64>,
{
    lookup(key).ok_or_else(|| TimerError::InvalidKey { key: key.to_string() })
}

impl From<&str> for TimePoint {
    fn from(key: &str) -> Self {
        TimePoint::Key(key.to_string())
    }
}

impl From<String> for TimePoint {
    fn from(key: String) -> Self {
        TimePoint::Key(key)
    }
}

impl From<f64> for TimePoint {
    fn from(ts: f64) -> Self {
        TimePoint::Timestamp(ts)
    }
}

impl From<Mark> for TimePoint {
    fn from(mark: Mark) -> Self {
        TimePoint::Mark(mark)
    }
}

impl From<&Mark> for TimePoint {
    fn from(mark: &Mark) -> Self {
        TimePoint::Mark(mark.clone())
    }
}

impl From<Value> for TimePoint {
    fn from(value: Value) -> Self {
        TimePoint::Value(value)
    }
}
