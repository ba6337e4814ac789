use std::fmt;

use thiserror::Error;

/// Why answer text could not be read as an `i64`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerErrorKind {
    /// not an integer at all
    Malformed,
    /// an integer, but too large in magnitude to hold
    OutOfRange,
}

impl fmt::Display for AnswerErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerErrorKind::Malformed => write!(f, "not an integer"),
            AnswerErrorKind::OutOfRange => write!(f, "integer out of range"),
        }
    }
}

/// Raw answer text that could not be parsed
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid input {raw:?}: {kind}")]
pub struct AnswerError {
    pub raw: String,
    pub kind: AnswerErrorKind,
}

/// Operations called in a state that does not accept them
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no quiz session is running")]
    NotActive,
    #[error("the quiz session has not ended")]
    NotEnded,
}

/// Settings that cannot parameterize a session
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("time limit must be at least one second")]
    ZeroTimeLimit,
    #[error("operand range is empty: min {min} is greater than max {max}")]
    EmptyRange { min: i64, max: i64 },
    #[error("operand range {min}..={max} produces answers that do not fit in 64 bits")]
    RangeOverflow { min: i64, max: i64 },
}
