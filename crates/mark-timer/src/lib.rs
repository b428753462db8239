pub mod clock;
pub mod error;
pub mod mark;
pub mod point;
pub mod rounding;
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Result, TimerError};
pub use mark::{Mark, MarkData};
pub use point::TimePoint;
pub use rounding::round_half_down;
pub use timer::{Timer, TimerAttribute, DEFAULT_NAME, DEFAULT_PRECISION};
