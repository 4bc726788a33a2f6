//! # attachment-webdav
//!
//! WebDAV storage backend for attachments. Queued writes (one per style) and
//! queued deletes are drained against a remote WebDAV share at flush time,
//! over a single reusable HTTP connection with optional basic auth.
//!
//! ## Example
//!
//! ```rust,ignore
//! use attachment_core::{AttachmentInfo, QueuedFile, Style, WebdavConfig};
//! use attachment_webdav::{AttachmentStorage, WebdavStorage};
//!
//! let config = WebdavConfig::new("http://asset-host/shared")
//!     .with_credentials("dav", "secret")
//!     .with_style("small", "64x64>");
//! let attachment = AttachmentInfo::new("photo", 42, Some("portrait.jpg".into()));
//!
//! let mut storage = WebdavStorage::new(&config, attachment)?;
//! storage.queue_write(Style::from("small"), QueuedFile::from_filename(thumb, "portrait.jpg"));
//! storage.flush_writes().await?;
//! ```

pub mod collections;
pub mod connection;
pub mod endpoint;
pub mod error;
pub mod paths;
pub mod storage;

#[cfg(test)]
pub(crate) mod testserver;

pub use collections::ensure_collection_path;
pub use connection::Connection;
pub use endpoint::{Credentials, ServerEndpoint};
pub use error::{WebdavError, WebdavResult};
pub use paths::PathResolver;
pub use storage::{AttachmentStorage, FileStream, WebdavStorage};
