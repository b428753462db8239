//! Utility functions and helpers

/// Human-readable rendering of a duration given in fractional seconds
pub fn format_duration_secs(secs: f64) -> String {
    let secs = secs.abs();
    if secs < 0.001 {
        format!("{:.0}μs", secs * 1_000_000.0)
    } else if secs < 1.0 {
        format!("{:.2}ms", secs * 1_000.0)
    } else if secs < 60.0 {
        format!("{:.2}s", secs)
    } else {
        let minutes = (secs / 60.0).floor();
        format!("{}m{:.2}s", minutes, secs - minutes * 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration_secs(0.0005), "500μs");
        assert_eq!(format_duration_secs(0.0015), "1.50ms");
        assert_eq!(format_duration_secs(1.5), "1.50s");
        assert_eq!(format_duration_secs(90.5), "1m30.50s");
    }

    #[test]
    fn test_format_negative_uses_magnitude() {
        assert_eq!(format_duration_secs(-1.5), "1.50s");
    }
}
