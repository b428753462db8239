//! # marktime: in-process mark timer
//!
//! Records named marks against a stopwatch:
//! - elapsed time since creation and since the previous mark
//! - arbitrary JSON metadata per mark
//! - half-down rounding to a configurable precision
//! - diffs between marks, raw timestamps and mark-like values

pub mod config;
pub mod utils;

pub use mark_timer;
pub use mark_timer::{Mark, MarkData, TimePoint, Timer, TimerError};

pub type Result<T> = anyhow::Result<T>;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
