use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TimerError {
    #[error("Timer {name} is stopped, no further marks can be added")]
    Frozen { name: String },

    #[error("Expected at least 2 time points, got {given}")]
    TooFewArguments { given: usize },

    #[error("Expected exactly 2 time points, got {given}; use diff_chain for more")]
    TooManyArguments { given: usize },

    #[error("No mark stored under key {key:?}")]
    InvalidKey { key: String },

    #[error("Mark has no numeric timestamp field")]
    InvalidMark,

    #[error("Unsupported time point: {kind}")]
    InvalidArgument { kind: &'static str },
}

pub type Result<T> = std::result::Result<T, TimerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TimerError::Frozen { name: "db".to_string() };
        assert_eq!(err.to_string(), "Timer db is stopped, no further marks can be added");

        let err = TimerError::InvalidKey { key: "missing".to_string() };
        assert!(err.to_string().contains("\"missing\""));

        let err = TimerError::TooFewArguments { given: 1 };
        assert!(err.to_string().contains("got 1"));
    }
}
