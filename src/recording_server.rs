//! A local HTTP server that records every request and answers each one with
//! the same canned response.

use std::{
    net::TcpListener,
    sync::{Arc, Mutex},
};

use axum::{
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    Router,
};

#[derive(Clone, Debug)]
pub(crate) struct RecordedRequest {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: Option<String>,
    pub(crate) headers: HeaderMap,
    pub(crate) body: String,
}

impl RecordedRequest {
    pub(crate) fn header(&self, name: &str) -> &str {
        self.headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
    }
}

#[derive(Clone)]
struct RecorderState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    status: StatusCode,
    body: &'static str,
}

pub(crate) struct RecordingServer {
    pub(crate) url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl RecordingServer {
    /// Listen on a free local port. Must be called from within a Tokio
    /// runtime.
    pub(crate) fn start(status: StatusCode, body: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("local port should be free");
        let address = listener.local_addr().expect("listener should have an address");

        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = RecorderState {
            requests: requests.clone(),
            status,
            body,
        };

        let app = Router::new().fallback(record).with_state(state);
        let server = axum::Server::from_tcp(listener)
            .expect("listener should be usable")
            .serve(app.into_make_service());
        tokio::spawn(server);

        Self {
            url: format!("http://{}", address),
            requests,
        }
    }

    pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn record(
    State(state): State<RecorderState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], &'static str) {
    state.requests.lock().unwrap().push(RecordedRequest {
        method,
        path: uri.path().to_owned(),
        query: uri.query().map(str::to_owned),
        headers,
        body,
    });

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body,
    )
}
