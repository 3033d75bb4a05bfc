//! Centralised error types used across the crate.

use std::{error::Error, fmt, io};

/// Top-level error type bubbled up by public APIs.
#[derive(Debug)]
pub enum ChartError {
    Io(io::Error),
    /// Every input path was missing.
    NoInput,
    /// SIGINT arrived while the stream was still loading.
    Interrupted { loaded: usize },
}

impl ChartError {
    /// Process exit code matching the shell conventions for each failure.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            ChartError::Io(_) | ChartError::NoInput => 1,
            ChartError::Interrupted { .. } => 130,
        }
    }
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartError::Io(e) => write!(f, "{e}"),
            ChartError::NoInput => write!(f, "No input files found."),
            ChartError::Interrupted { loaded } => write!(
                f,
                "\nAfter loading {loaded} values, it was interrupted by the user."
            ),
        }
    }
}
impl Error for ChartError {}

impl From<io::Error> for ChartError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
