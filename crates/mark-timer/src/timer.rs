use std::collections::HashMap;
use tracing::{debug, trace};
use serde_json::Value;

use crate::clock::{Clock, SystemClock};
use crate::error::{Result, TimerError};
use crate::mark::{merge_data, Mark, MarkData, MESSAGE};
use crate::point::TimePoint;
use crate::rounding::abs_diff_rounded;

pub const DEFAULT_NAME: &str = "default";
pub const DEFAULT_PRECISION: u32 = 4;
pub const START_KEY: &str = "start";
pub const END_KEY: &str = "end";

const KEY_SEPARATOR: char = '_';

/// Internal timer attributes, looked up by name via [`Timer::attribute`]
#[derive(Debug, Clone, PartialEq)]
pub enum TimerAttribute {
    Name(String),
    Start(f64),
    Frozen(bool),
    Precision(u32),
    LastKey(Option<String>),
}

/// Stopwatch recording named marks relative to its creation and to the
/// previously recorded mark.
///
/// A `"start"` mark is recorded on construction. [`Timer::stop`] records
/// `"end"` and freezes the timer; after that only reads succeed.
#[derive(Debug)]
pub struct Timer<C: Clock = SystemClock> {
    name: String,
    start: f64,
    precision: u32,
    frozen: bool,
    marks: Vec<(String, Mark)>,
    index: HashMap<String, usize>,
    last_key: Option<String>,
    clock: C,
}

impl Timer<SystemClock> {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_precision(name, DEFAULT_PRECISION)
    }

    pub fn with_precision(name: impl Into<String>, precision: u32) -> Self {
        Self::with_clock(name, precision, SystemClock)
    }
}

impl Default for Timer<SystemClock> {
    fn default() -> Self {
        Self::new(DEFAULT_NAME)
    }
}

impl<C: Clock> Timer<C> {
    pub fn with_clock(name: impl Into<String>, precision: u32, clock: C) -> Self {
        let name = name.into();
        let start = clock.now();
        let mut timer = Self {
            name,
            start,
            precision,
            frozen: false,
            marks: Vec::new(),
            index: HashMap::new(),
            last_key: None,
            clock,
        };

        let mut data = MarkData::new();
        data.insert(
            MESSAGE.to_string(),
            Value::String(format!("Marker {} created", timer.name)),
        );
        timer.record(START_KEY, data);
        timer
    }

    /// Record a mark under `key`, merging `data` over the computed timings.
    ///
    /// A key that is already taken is stored under `key_<timestamp>` instead;
    /// existing marks are never replaced.
    pub fn mark(&mut self, key: &str, data: MarkData) -> Result<Mark> {
        if self.frozen {
            debug!(timer = %self.name, key, "rejected mark on stopped timer");
            return Err(TimerError::Frozen { name: self.name.clone() });
        }
        Ok(self.record(key, data))
    }

    #[inline]
    pub fn mark_key(&mut self, key: &str) -> Result<Mark> {
        self.mark(key, MarkData::new())
    }

    fn record(&mut self, key: &str, data: MarkData) -> Mark {
        let ts = self.clock.now();
        let last_ts = self.last_mark().map_or(ts, |mark| mark.timestamp);
        let since_start = self.calc_round(ts, self.start);
        let since_last = self.calc_round(ts, last_ts);

        let mark = Mark {
            key: key.to_string(),
            timestamp: ts,
            data: merge_data(since_start, since_last, data),
        };

        let storage_key = self.storage_key(key, ts);
        trace!(
            timer = %self.name,
            key = %storage_key,
            since_start,
            since_last,
            "mark recorded"
        );

        self.index.insert(storage_key.clone(), self.marks.len());
        self.marks.push((storage_key.clone(), mark.clone()));
        self.last_key = Some(storage_key);
        mark
    }

    fn storage_key(&self, key: &str, ts: f64) -> String {
        if !self.index.contains_key(key) {
            return key.to_string();
        }

        let base = format!("{key}{KEY_SEPARATOR}{ts}");
        let mut candidate = base.clone();
        let mut counter = 1u64;
        while self.index.contains_key(&candidate) {
            candidate = format!("{base}{KEY_SEPARATOR}{counter}");
            counter += 1;
        }

        trace!(timer = %self.name, key, stored_as = %candidate, "duplicate mark key");
        candidate
    }

    #[inline]
    pub fn last_mark(&self) -> Option<&Mark> {
        self.last_key.as_deref().and_then(|key| self.get_mark(key))
    }

    /// The most recent mark, or a keyless placeholder stamped with the
    /// current time if nothing has been recorded.
    pub fn get_last_mark(&self) -> Mark {
        match self.last_mark() {
            Some(mark) => mark.clone(),
            None => Mark::new("", self.clock.now()),
        }
    }

    /// `|a - b|` rounded half-down to this timer's precision
    #[inline]
    pub fn calc_round(&self, a: f64, b: f64) -> f64 {
        abs_diff_rounded(a, b, self.precision)
    }

    /// Rounded elapsed time between exactly two points.
    pub fn diff(&self, points: &[TimePoint]) -> Result<f64> {
        match points {
            [a, b] => {
                let a = self.resolve(a)?;
                let b = self.resolve(b)?;
                Ok(self.calc_round(a, b))
            }
            _ if points.len() < 2 => Err(TimerError::TooFewArguments { given: points.len() }),
            _ => Err(TimerError::TooManyArguments { given: points.len() }),
        }
    }

    /// Rounded elapsed time between each pair of consecutive points.
    pub fn diff_chain(&self, points: &[TimePoint]) -> Result<Vec<f64>> {
        if points.len() < 2 {
            return Err(TimerError::TooFewArguments { given: points.len() });
        }

        let timestamps = points
            .iter()
            .map(|point| self.resolve(point))
            .collect::<Result<Vec<_>>>()?;

        Ok(timestamps
            .windows(2)
            .map(|pair| self.calc_round(pair[0], pair[1]))
            .collect())
    }

    fn resolve(&self, point: &TimePoint) -> Result<f64> {
        point.resolve(|key| self.get_mark(key).map(|mark| mark.timestamp))
    }

    /// Rounded time between `ts` (or now) and the last mark
    pub fn since_last(&self, ts: Option<f64>) -> f64 {
        let ts = ts.unwrap_or_else(|| self.clock.now());
        self.calc_round(ts, self.get_last_mark().timestamp)
    }

    /// Record the `"end"` mark, freeze the timer and return total elapsed time.
    pub fn stop(&mut self) -> Result<f64> {
        let mut data = MarkData::new();
        data.insert(
            MESSAGE.to_string(),
            Value::String(format!("Timer {} stopped", self.name)),
        );
        let end = self.mark(END_KEY, data)?;
        self.frozen = true;

        let elapsed = self.calc_round(end.timestamp, self.start);
        debug!(timer = %self.name, elapsed, marks = self.marks.len(), "timer stopped");
        Ok(elapsed)
    }

    /// Marks in insertion order, paired with their storage keys.
    ///
    /// A non-empty `search` keeps only marks whose key contains it,
    /// ignoring case.
    pub fn marks(&self, search: &str) -> Vec<(&str, &Mark)> {
        let needle = search.to_lowercase();
        self.iter()
            .filter(|(_, mark)| needle.is_empty() || mark.key.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Mark)> + '_ {
        self.marks.iter().map(|(key, mark)| (key.as_str(), mark))
    }

    #[inline]
    pub fn get_mark(&self, key: &str) -> Option<&Mark> {
        self.index.get(key).map(|&i| &self.marks[i].1)
    }

    pub fn attribute(&self, name: &str) -> Option<TimerAttribute> {
        match name {
            "name" => Some(TimerAttribute::Name(self.name.clone())),
            "start" => Some(TimerAttribute::Start(self.start)),
            "frozen" => Some(TimerAttribute::Frozen(self.frozen)),
            "precision" => Some(TimerAttribute::Precision(self.precision)),
            "last_key" => Some(TimerAttribute::LastKey(self.last_key.clone())),
            _ => None,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn start(&self) -> f64 {
        self.start
    }

    #[inline]
    pub fn precision(&self) -> u32 {
        self.precision
    }

    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    #[inline]
    pub fn last_key(&self) -> Option<&str> {
        self.last_key.as_deref()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
