//! Storage backend configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::interpolation::DEFAULT_PATH_TEMPLATE;

/// WebDAV storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebdavConfig {
    /// Base URL of the WebDAV share: scheme, host, port and base path.
    pub url: String,

    /// Basic-auth credentials; when `username` is set an Authorization
    /// header is added to every request.
    pub username: Option<String>,
    pub password: Option<String>,

    /// Path template interpolated per (attachment, style).
    #[serde(default = "default_path_template")]
    pub path_template: String,

    /// Style name -> transform spec. Transforms are interpreted by the host
    /// framework, not by storage backends.
    #[serde(default)]
    pub styles: HashMap<String, String>,
}

fn default_path_template() -> String {
    DEFAULT_PATH_TEMPLATE.to_string()
}

impl WebdavConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            username: None,
            password: None,
            path_template: default_path_template(),
            styles: HashMap::new(),
        }
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    pub fn with_style(mut self, name: impl Into<String>, transform: impl Into<String>) -> Self {
        self.styles.insert(name.into(), transform.into());
        self
    }

    pub fn with_path_template(mut self, template: impl Into<String>) -> Self {
        self.path_template = template.into();
        self
    }

    /// Load configuration from environment variables.
    ///
    /// `WEBDAV_URL` is required; `WEBDAV_USERNAME`, `WEBDAV_PASSWORD` and
    /// `WEBDAV_PATH_TEMPLATE` are optional.
    pub fn from_env() -> CoreResult<Self> {
        let url =
            std::env::var("WEBDAV_URL").map_err(|_| CoreError::MissingConfig("WEBDAV_URL"))?;
        let mut config = Self::new(url);

        if let Ok(username) = std::env::var("WEBDAV_USERNAME") {
            config.username = Some(username);
        }
        if let Ok(password) = std::env::var("WEBDAV_PASSWORD") {
            config.password = Some(password);
        }
        if let Ok(template) = std::env::var("WEBDAV_PATH_TEMPLATE") {
            config.path_template = template;
        }

        Ok(config)
    }
}
