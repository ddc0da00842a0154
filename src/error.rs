//! Error types for the polygon game crate

use thiserror::Error;

/// Main error type for the polygon game crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid parameters n={n}, k={k}: {reason}")]
    InvalidParameters { n: u32, k: u32, reason: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("invalid terminal rule '{input}'. Expected one of: {expected}")]
    ParseTerminalRule { input: String, expected: String },

    #[error("invalid gap sequence {gaps:?}: {reason}")]
    InvalidGapSequence { gaps: Vec<u32>, reason: String },

    #[error("starting polygon is degenerate (area {area:e})")]
    DegenerateStart { area: f64 },

    #[error("search cancelled")]
    Cancelled,

    #[error("search expanded more than {limit} nodes")]
    NodeLimitExceeded { limit: usize },

    #[error("observer failed: {message}")]
    Observer { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
