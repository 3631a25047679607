//! Error types for the dilemma crate

use thiserror::Error;

/// Main error type for the dilemma crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("{name} must be a probability in [0, 1], got {value}")]
    InvalidProbability { name: String, value: f64 },

    #[error("unknown strategy '{input}'. Expected one of: {expected}")]
    UnknownStrategy { input: String, expected: String },

    #[error("invalid action '{input}' (expected 'C' or 'D')")]
    InvalidAction { input: String },

    #[error("invalid state '{input}' (expected 'Start,Start' or a pair of actions like 'C,D')")]
    InvalidState { input: String },

    #[error("unsupported save format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },

    #[error("{resource} is unavailable: a writer panicked while holding its lock")]
    PoisonedLock { resource: String },
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

/// Validate that a value lies in the closed unit interval.
pub(crate) fn ensure_probability(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidProbability {
            name: name.to_string(),
            value,
        })
    }
}
