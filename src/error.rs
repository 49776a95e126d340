//! Error type shared by the predictor core and the trace harness.

use thiserror::Error;
use crate::logic::HashMode;

/// Errors reported by the simulator.
///
/// Everything apart from [`Error::Io`], [`Error::Json`] and
/// [`Error::ParseTrace`] is a configuration or programming mistake: predictor
/// state is deterministic, so none of these are ever retried or corrected.
#[derive(Debug, Error)]
pub enum Error {
    /// A bit-vector does not match the fixed width of the component
    /// receiving it.
    #[error("{name}: expected {expected} bits, got {actual}")]
    InvalidLength {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A key presented to a prediction history table has the wrong width.
    #[error("table key must be {expected} bits wide, got {actual}")]
    InvalidKeyWidth { expected: usize, actual: usize },

    /// A required part of a predictor was never configured.
    #[error("{0} is not configured")]
    UnconfiguredComponent(&'static str),

    /// The selected hash mode has no implementation.
    #[error("hash mode '{0}' is not supported")]
    UnsupportedHashMode(HashMode),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A line of a text trace could not be parsed.
    #[error("trace line {line}: {reason}")]
    ParseTrace { line: usize, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
