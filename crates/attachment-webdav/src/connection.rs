//! Shared HTTP connection handling.

use once_cell::sync::OnceCell;
use reqwest::{Client, Method, RequestBuilder, Response};
use tracing::debug;

use crate::endpoint::ServerEndpoint;
use crate::error::WebdavResult;

/// Lazily created, reusable HTTP client bound to one endpoint.
///
/// The client is a pooled handle: created on first use with transport
/// defaults, reused for every request, and dropped with the owning storage
/// value.
#[derive(Debug)]
pub struct Connection {
    endpoint: ServerEndpoint,
    client: OnceCell<Client>,
}

impl Connection {
    pub fn new(endpoint: ServerEndpoint) -> Self {
        Self {
            endpoint,
            client: OnceCell::new(),
        }
    }

    pub fn endpoint(&self) -> &ServerEndpoint {
        &self.endpoint
    }

    fn client(&self) -> WebdavResult<&Client> {
        Ok(self.client.get_or_try_init(|| Client::builder().build())?)
    }

    /// Build a request for a server path.
    pub fn request(&self, method: Method, server_path: &str) -> WebdavResult<RequestBuilder> {
        let url = self.endpoint.url_for(server_path);
        Ok(self.client()?.request(method, url))
    }

    /// Attach basic-auth credentials when configured, then execute.
    ///
    /// Transport failures are fatal for the single request and propagate to
    /// the caller.
    pub async fn execute(&self, request: RequestBuilder) -> WebdavResult<Response> {
        let request = match self.endpoint.credentials() {
            Some(creds) => request.basic_auth(&creds.username, creds.password.as_deref()),
            None => request,
        };
        let response = request.send().await?;
        debug!(status = %response.status(), "request completed");
        Ok(response)
    }
}
