//! Error type for configuration and startup.

use thiserror::Error;

/// Errors that stop the demo before or while the terminal program runs.
#[derive(Error, Debug)]
pub enum Error {
    /// A setting lies outside its slider bounds.
    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange {
        /// Setting name.
        name: &'static str,
        /// Rejected value.
        value: usize,
        /// Lower bound.
        min: usize,
        /// Upper bound.
        max: usize,
    },

    /// A setting is within bounds but not on a slider step.
    #[error("{name} must be a multiple of {step}, got {value}")]
    OffStep {
        /// Setting name.
        name: &'static str,
        /// Rejected value.
        value: usize,
        /// Required step.
        step: usize,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The tracing subscriber could not be installed.
    #[error("Logging setup failed: {0}")]
    Logging(String),

    /// The terminal program failed.
    #[error("Terminal runtime error: {0}")]
    Runtime(String),
}

impl Error {
    /// Exit code for the binary
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::OutOfRange { .. } | Error::OffStep { .. } => 2,
            Error::Io(_) | Error::Logging(_) | Error::Runtime(_) => 1,
        }
    }
}

/// Result alias over [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
