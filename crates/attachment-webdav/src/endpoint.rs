//! Server endpoint derived once from the configured WebDAV URL.

use url::Url;

use crate::error::{WebdavError, WebdavResult};

/// Basic-auth credentials attached to every request when configured.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: Option<String>,
}

/// Immutable description of the remote WebDAV share.
#[derive(Debug, Clone)]
pub struct ServerEndpoint {
    scheme: String,
    host: String,
    port: u16,
    base_path: String,
    credentials: Option<Credentials>,
}

impl ServerEndpoint {
    pub fn parse(raw: &str, credentials: Option<Credentials>) -> WebdavResult<Self> {
        let url = Url::parse(raw).map_err(|err| WebdavError::InvalidUrl {
            url: raw.to_string(),
            message: err.to_string(),
        })?;
        let host = url
            .host_str()
            .ok_or_else(|| WebdavError::InvalidUrl {
                url: raw.to_string(),
                message: "missing host".to_string(),
            })?
            .to_string();
        let port = url.port_or_known_default().unwrap_or(80);
        let base_path = url.path().trim_end_matches('/').to_string();

        Ok(Self {
            scheme: url.scheme().to_string(),
            host,
            port,
            base_path,
            credentials,
        })
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// `base_path + "/" + relative`; the only way request paths are formed,
    /// so externally supplied absolute paths cannot escape the share.
    pub fn server_path(&self, relative: &str) -> String {
        format!("{}/{}", self.base_path, relative)
    }

    /// Fully qualified URL for a server path.
    pub fn url_for(&self, server_path: &str) -> String {
        format!("{}://{}:{}{}", self.scheme, self.host, self.port, server_path)
    }

    /// The endpoint including its base path, for externally consumable URLs.
    pub fn root_url(&self) -> String {
        self.url_for(&self.base_path)
    }
}
