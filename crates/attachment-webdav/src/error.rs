//! Error taxonomy for the WebDAV backend.
//!
//! Two lanes: collection creation and transport problems are fatal and abort
//! a flush; individual transfer outcomes are logged and never surfaced.

use attachment_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WebdavError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to create collection {path}: HTTP {status}")]
    CollectionCreate { path: String, status: u16 },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid WebDAV URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type WebdavResult<T> = Result<T, WebdavError>;
