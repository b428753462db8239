use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::clock;

pub const SINCE_START: &str = "since_start";
pub const SINCE_LAST: &str = "since_last";
pub const MESSAGE: &str = "message";

/// Free-form metadata attached to a mark
pub type MarkData = Map<String, Value>;

/// A keyed point in time recorded by a [`Timer`](crate::Timer)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    /// Key as requested by the caller (storage key may carry a suffix)
    pub key: String,
    /// Seconds since the Unix epoch
    pub timestamp: f64,
    #[serde(default)]
    pub data: MarkData,
}

impl Mark {
    #[inline]
    pub fn new(key: impl Into<String>, timestamp: f64) -> Self {
        Self {
            key: key.into(),
            timestamp,
            data: MarkData::new(),
        }
    }

    #[inline]
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn since_start(&self) -> Option<f64> {
        self.data.get(SINCE_START).and_then(Value::as_f64)
    }

    pub fn since_last(&self) -> Option<f64> {
        self.data.get(SINCE_LAST).and_then(Value::as_f64)
    }

    pub fn message(&self) -> Option<&str> {
        self.data.get(MESSAGE).and_then(Value::as_str)
    }

    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        clock::to_datetime(self.timestamp)
    }
}

/// Builds mark metadata: computed timings first, caller fields on top.
pub(crate) fn merge_data(since_start: f64, since_last: f64, caller: MarkData) -> MarkData {
    let mut data = MarkData::with_capacity(caller.len() + 2);
    data.insert(SINCE_START.to_string(), number(since_start));
    data.insert(SINCE_LAST.to_string(), number(since_last));
    data.extend(caller);
    data
}

#[inline]
fn number(value: f64) -> Value {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}
