//! # attachment-core
//!
//! Shared building blocks for attachment storage backends:
//! - Attachment and style model types
//! - Queued file payloads with content metadata
//! - Path template interpolation
//! - Backend configuration loading

pub mod config;
pub mod error;
pub mod interpolation;
pub mod model;

pub use config::WebdavConfig;
pub use error::{CoreError, CoreResult};
pub use interpolation::{PathTemplate, DEFAULT_PATH_TEMPLATE};
pub use model::{AttachmentInfo, QueuedFile, Style};
