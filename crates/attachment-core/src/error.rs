//! Error types shared by attachment storage backends.

use thiserror::Error;

/// Errors raised by configuration loading and path resolution.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Missing configuration: {0}")]
    MissingConfig(&'static str),

    #[error("No original file has been recorded for this attachment")]
    NoOriginalFile,

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

pub type CoreResult<T> = Result<T, CoreError>;
