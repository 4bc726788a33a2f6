//! WebDAV storage backend.
//!
//! Queued writes (one entry per style) and queued deletes are drained against
//! the remote server at flush time. Collection-creation failures and
//! transport errors abort a flush; individual transfer outcomes are logged
//! and the queue entry is considered processed either way.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Body, Method, Response};
use tracing::{info, instrument, warn};

use attachment_core::{AttachmentInfo, PathTemplate, QueuedFile, Style, WebdavConfig};

use crate::collections::ensure_collection_path;
use crate::connection::Connection;
use crate::endpoint::{Credentials, ServerEndpoint};
use crate::error::{WebdavError, WebdavResult};
use crate::paths::PathResolver;

/// File contents fetched from (or still queued for) the server.
#[derive(Debug, Clone)]
pub struct FileStream {
    pub bytes: Bytes,
    pub content_type: String,
    pub size: u64,
}

impl FileStream {
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }
}

/// Storage collaborator surface exposed to the attachment framework.
#[async_trait]
pub trait AttachmentStorage {
    /// Whether the style's resource exists on the server. `false` without a
    /// request when no original file has been recorded.
    async fn exists(&self, style: &Style) -> bool;

    /// The style's contents: the queued-but-unflushed copy when present,
    /// otherwise fetched from the server.
    async fn to_stream(&self, style: &Style) -> WebdavResult<FileStream>;

    /// Drain the write queue against the server.
    async fn flush_writes(&mut self) -> WebdavResult<()>;

    /// Drain the delete queue against the server.
    async fn flush_deletes(&mut self) -> WebdavResult<()>;

    /// Publicly fetchable URL for a style.
    fn external_url(&self, style: &Style) -> WebdavResult<String>;
}

/// WebDAV-backed attachment storage.
pub struct WebdavStorage {
    connection: Connection,
    resolver: PathResolver,
    queued_for_write: Vec<(Style, QueuedFile)>,
    queued_for_delete: Vec<String>,
}

impl WebdavStorage {
    pub fn new(config: &WebdavConfig, attachment: AttachmentInfo) -> WebdavResult<Self> {
        let credentials = config.username.as_ref().map(|username| Credentials {
            username: username.clone(),
            password: config.password.clone(),
        });
        let endpoint = ServerEndpoint::parse(&config.url, credentials)?;
        let resolver = PathResolver::new(
            PathTemplate::new(&config.path_template),
            endpoint.clone(),
            attachment,
        );

        Ok(Self {
            connection: Connection::new(endpoint),
            resolver,
            queued_for_write: Vec::new(),
            queued_for_delete: Vec::new(),
        })
    }

    pub fn attachment(&self) -> &AttachmentInfo {
        self.resolver.attachment()
    }

    /// Queue a style's contents for the next write flush. Re-queueing a style
    /// replaces its pending entry.
    pub fn queue_write(&mut self, style: Style, file: QueuedFile) {
        if let Some(entry) = self.queued_for_write.iter_mut().find(|(s, _)| *s == style) {
            entry.1 = file;
        } else {
            self.queued_for_write.push((style, file));
        }
    }

    /// Queue a server-relative path for the next delete flush.
    pub fn queue_delete(&mut self, path: impl Into<String>) {
        self.queued_for_delete.push(path.into());
    }

    pub fn queued_writes(&self) -> usize {
        self.queued_for_write.len()
    }

    pub fn queued_deletes(&self) -> usize {
        self.queued_for_delete.len()
    }

    fn queued_file(&self, style: &Style) -> Option<&QueuedFile> {
        self.queued_for_write
            .iter()
            .find(|(s, _)| s == style)
            .map(|(_, file)| file)
    }

    async fn fetch(&self, style: &Style) -> WebdavResult<Response> {
        let server_path = self.resolver.server_path(style)?;
        let request = self.connection.request(Method::GET, &server_path)?;
        self.connection.execute(request).await
    }

    // One-chunk stream body; the request is framed with chunked transfer
    // encoding instead of a Content-Length.
    fn chunked_body(file: &QueuedFile) -> Body {
        let bytes = file.bytes.clone();
        Body::wrap_stream(stream::once(async move { Ok::<Bytes, std::io::Error>(bytes) }))
    }
}

#[async_trait]
impl AttachmentStorage for WebdavStorage {
    async fn exists(&self, style: &Style) -> bool {
        if self.attachment().filename.is_none() {
            return false;
        }
        match self.fetch(style).await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    async fn to_stream(&self, style: &Style) -> WebdavResult<FileStream> {
        if let Some(file) = self.queued_file(style) {
            return Ok(FileStream {
                bytes: file.bytes.clone(),
                content_type: file.content_type.clone(),
                size: file.bytes.len() as u64,
            });
        }

        let response = self.fetch(style).await?;
        if !response.status().is_success() {
            return Err(WebdavError::NotFound(self.resolver.server_path(style)?));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .unwrap_or_else(|| mime::APPLICATION_OCTET_STREAM.to_string());
        let bytes = response.bytes().await?;
        let size = bytes.len() as u64;

        Ok(FileStream {
            bytes,
            content_type,
            size,
        })
    }

    #[instrument(skip(self), fields(attachment = %self.attachment().name))]
    async fn flush_writes(&mut self) -> WebdavResult<()> {
        info!(queued = self.queued_for_write.len(), "writing files");

        for (style, file) in &self.queued_for_write {
            let relative = self.resolver.resolve(style)?;
            if let Some((dir, _)) = relative.rsplit_once('/') {
                ensure_collection_path(&self.connection, dir).await?;
            }

            // POST replaces an existing resource, PUT creates a new one.
            let method = if self.exists(style).await {
                Method::POST
            } else {
                Method::PUT
            };

            let server_path = self.resolver.server_path(style)?;
            info!(path = %server_path, method = %method, "uploading");
            let request = self
                .connection
                .request(method, &server_path)?
                .header(CONTENT_TYPE, file.content_type.as_str())
                .body(Self::chunked_body(file));
            let response = self.connection.execute(request).await?;

            // Best effort per entry: the outcome is recorded, not raised.
            if response.status().is_success() {
                info!(path = %server_path, status = %response.status(), "upload complete");
            } else {
                warn!(path = %server_path, status = %response.status(), "upload failed");
            }
        }

        self.queued_for_write.clear();
        Ok(())
    }

    #[instrument(skip(self), fields(attachment = %self.attachment().name))]
    async fn flush_deletes(&mut self) -> WebdavResult<()> {
        info!(queued = self.queued_for_delete.len(), "deleting files");

        for path in &self.queued_for_delete {
            let server_path = self.connection.endpoint().server_path(path);
            info!(path = %server_path, "deleting");
            let request = self.connection.request(Method::DELETE, &server_path)?;
            let response = self.connection.execute(request).await?;

            if !response.status().is_success() {
                warn!(path = %server_path, status = %response.status(), "delete failed");
            }
        }

        self.queued_for_delete.clear();
        Ok(())
    }

    fn external_url(&self, style: &Style) -> WebdavResult<String> {
        self.resolver.external_url(style)
    }
}
