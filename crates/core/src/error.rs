//! Error types for Tally.

use alloc::string::String;
use core::fmt;

/// Result type alias for Tally operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types raised by Tally and its collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No matcher is registered under this id.
    MatcherNotFound {
        id: String,
    },
    /// A matcher was configured with options of the wrong shape.
    InvalidMatcherOptions {
        id: String,
        message: String,
    },
    /// A name pattern could not be parsed.
    InvalidPattern {
        pattern: String,
    },
    /// No reducer is registered under this id.
    ReducerNotFound {
        id: String,
    },
    /// A column's value count disagrees with its frame's length.
    LengthMismatch {
        column: String,
        expected: usize,
        got: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MatcherNotFound { id } => {
                write!(f, "Matcher not found: {}", id)
            }
            Error::InvalidMatcherOptions { id, message } => {
                write!(f, "Invalid options for matcher {}: {}", id, message)
            }
            Error::InvalidPattern { pattern } => {
                write!(f, "Invalid name pattern: {}", pattern)
            }
            Error::ReducerNotFound { id } => {
                write!(f, "Reducer not found: {}", id)
            }
            Error::LengthMismatch {
                column,
                expected,
                got,
            } => {
                write!(
                    f,
                    "Column {} has {} values, frame length is {}",
                    column, got, expected
                )
            }
        }
    }
}

impl Error {
    /// Creates a matcher not found error.
    pub fn matcher_not_found(id: impl Into<String>) -> Self {
        Error::MatcherNotFound { id: id.into() }
    }

    /// Creates an invalid matcher options error.
    pub fn invalid_matcher_options(id: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidMatcherOptions {
            id: id.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>) -> Self {
        Error::InvalidPattern {
            pattern: pattern.into(),
        }
    }

    /// Creates a reducer not found error.
    pub fn reducer_not_found(id: impl Into<String>) -> Self {
        Error::ReducerNotFound { id: id.into() }
    }

    /// Creates a length mismatch error.
    pub fn length_mismatch(column: impl Into<String>, expected: usize, got: usize) -> Self {
        Error::LengthMismatch {
            column: column.into(),
            expected,
            got,
        }
    }
}
