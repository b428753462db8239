use std::str::FromStr;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Round `value` to `precision` fractional digits, resolving ties toward zero.
///
/// The value is taken at its shortest decimal representation, so `0.00005`
/// is an exact tie at 4 digits and rounds to `0.0`, not `0.0001`.
pub fn round_half_down(value: f64, precision: u32) -> f64 {
    match to_decimal(value) {
        // parse back through text so the result is the nearest f64
        Some(decimal) => decimal
            .round_dp_with_strategy(precision, RoundingStrategy::MidpointTowardZero)
            .to_string()
            .parse()
            .unwrap_or(value),
        None => value,
    }
}

/// Absolute difference of two timestamps, rounded half-down
#[inline]
pub fn abs_diff_rounded(a: f64, b: f64, precision: u32) -> f64 {
    round_half_down((a - b).abs(), precision)
}

fn to_decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    // f64 Display yields the shortest round-trip digits
    Decimal::from_str(&value.to_string())
        .ok()
        .or_else(|| Decimal::from_f64(value))
}
