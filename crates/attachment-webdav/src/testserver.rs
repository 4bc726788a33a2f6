//! In-process HTTP server for exercising the backend against a real listener.
//!
//! Records every request's method, path and Authorization header, and serves
//! an in-memory resource map with WebDAV-ish semantics: MKCOL answers a
//! configurable status, GET serves stored resources, PUT/POST store the body,
//! DELETE removes it.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::Router;
use bytes::Bytes;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub transfer_encoding: Option<String>,
}

#[derive(Debug, Default)]
struct ServerState {
    requests: Vec<RecordedRequest>,
    resources: HashMap<String, (Bytes, String)>,
    mkcol_overrides: HashMap<String, StatusCode>,
    transfer_overrides: HashMap<String, StatusCode>,
}

pub struct TestServer {
    addr: SocketAddr,
    state: Arc<Mutex<ServerState>>,
}

impl TestServer {
    pub async fn spawn() -> Self {
        let state = Arc::new(Mutex::new(ServerState::default()));
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn url(&self, base_path: &str) -> String {
        format!("http://{}{}", self.addr, base_path)
    }

    /// Answer MKCOL at `path` with `status` instead of 201.
    pub fn override_mkcol(&self, path: &str, status: StatusCode) {
        self.state
            .lock()
            .unwrap()
            .mkcol_overrides
            .insert(path.to_string(), status);
    }

    /// Answer PUT/POST/DELETE at `path` with `status`, without touching the
    /// resource map.
    pub fn override_transfer(&self, path: &str, status: StatusCode) {
        self.state
            .lock()
            .unwrap()
            .transfer_overrides
            .insert(path.to_string(), status);
    }

    pub fn insert(&self, path: &str, bytes: impl Into<Bytes>, content_type: &str) {
        self.state
            .lock()
            .unwrap()
            .resources
            .insert(path.to_string(), (bytes.into(), content_type.to_string()));
    }

    pub fn resource(&self, path: &str) -> Option<Bytes> {
        self.state
            .lock()
            .unwrap()
            .resources
            .get(path)
            .map(|(bytes, _)| bytes.clone())
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn requests_for(&self, method: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method)
            .collect()
    }
}

async fn handle(State(state): State<Arc<Mutex<ServerState>>>, request: Request) -> Response {
    let method = request.method().as_str().to_string();
    let path = request.uri().path().to_string();
    let authorization = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let transfer_encoding = request
        .headers()
        .get(header::TRANSFER_ENCODING)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();
    let body = axum::body::to_bytes(request.into_body(), usize::MAX)
        .await
        .unwrap_or_default();

    let mut state = state.lock().unwrap();
    state.requests.push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        authorization,
        transfer_encoding,
    });

    let override_status = state.transfer_overrides.get(&path).copied();
    let (status, body, content_type) = match method.as_str() {
        "MKCOL" => {
            let status = state
                .mkcol_overrides
                .get(&path)
                .copied()
                .unwrap_or(StatusCode::CREATED);
            (status, Bytes::new(), None)
        }
        "GET" => match state.resources.get(&path) {
            Some((bytes, ct)) => (StatusCode::OK, bytes.clone(), Some(ct.clone())),
            None => (StatusCode::NOT_FOUND, Bytes::new(), None),
        },
        "PUT" => match override_status {
            Some(status) => (status, Bytes::new(), None),
            None => {
                state.resources.insert(path, (body, content_type));
                (StatusCode::CREATED, Bytes::new(), None)
            }
        },
        "POST" => match override_status {
            Some(status) => (status, Bytes::new(), None),
            None => {
                state.resources.insert(path, (body, content_type));
                (StatusCode::NO_CONTENT, Bytes::new(), None)
            }
        },
        "DELETE" => match override_status {
            Some(status) => (status, Bytes::new(), None),
            None => {
                state.resources.remove(&path);
                (StatusCode::NO_CONTENT, Bytes::new(), None)
            }
        },
        _ => (StatusCode::METHOD_NOT_ALLOWED, Bytes::new(), None),
    };

    let mut builder = Response::builder().status(status);
    if let Some(ct) = content_type {
        builder = builder.header(header::CONTENT_TYPE, ct);
    }
    builder.body(Body::from(body)).unwrap()
}
