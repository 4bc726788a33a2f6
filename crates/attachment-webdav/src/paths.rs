//! Logical (attachment, style) to server path mapping.

use attachment_core::{AttachmentInfo, CoreError, PathTemplate, Style};

use crate::endpoint::ServerEndpoint;
use crate::error::WebdavResult;

/// Computes relative paths, server paths and external URLs for styles.
#[derive(Debug, Clone)]
pub struct PathResolver {
    template: PathTemplate,
    endpoint: ServerEndpoint,
    attachment: AttachmentInfo,
}

impl PathResolver {
    pub fn new(
        template: PathTemplate,
        endpoint: ServerEndpoint,
        attachment: AttachmentInfo,
    ) -> Self {
        Self {
            template,
            endpoint,
            attachment,
        }
    }

    pub fn attachment(&self) -> &AttachmentInfo {
        &self.attachment
    }

    /// Relative path for a style, from the configured template.
    pub fn resolve(&self, style: &Style) -> WebdavResult<String> {
        if self.attachment.filename.is_none() {
            return Err(CoreError::NoOriginalFile.into());
        }
        Ok(self.template.interpolate(&self.attachment, style))
    }

    /// Server path for a style: base path plus the relative path.
    pub fn server_path(&self, style: &Style) -> WebdavResult<String> {
        Ok(self.endpoint.server_path(&self.resolve(style)?))
    }

    /// Publicly fetchable URL for a style. A pure string computation, never
    /// validated against actual server state.
    pub fn external_url(&self, style: &Style) -> WebdavResult<String> {
        Ok(format!("{}/{}", self.endpoint.root_url(), self.resolve(style)?))
    }
}
