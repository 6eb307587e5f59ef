#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Request, State};
use axum::http::{header, HeaderName, StatusCode};
use axum::response::IntoResponse;
use axum::Router;
use tokio::net::TcpListener;

pub const DETAILED: &str = include_str!("../fixtures/detailed.json");
pub const SUMMARY: &str = include_str!("../fixtures/summary.json");
pub const WEEKLY: &str = include_str!("../fixtures/weekly.json");
pub const UNAUTHORIZED: &str = include_str!("../fixtures/401_unauthorized.json");
pub const TOO_MANY_REQUESTS: &str = include_str!("../fixtures/429_too_many_requests.json");

/// A request as seen by the mock server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
}

struct MockState {
    status: StatusCode,
    body: String,
    delay: Option<Duration>,
    hits: AtomicUsize,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Serves the same body with the same status on every path.
pub struct MockServer {
    addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockServer {
    pub async fn start(status: u16, body: &str) -> Self {
        Self::start_with_delay(status, body, None).await
    }

    pub async fn start_with_delay(status: u16, body: &str, delay: Option<Duration>) -> Self {
        let state = Arc::new(MockState {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.to_string(),
            delay,
            hits: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        });
        let app = Router::new()
            .fallback(serve_fixture)
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("no request was received")
    }
}

fn header_value(request: &Request, name: HeaderName) -> Option<String> {
    request
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

async fn serve_fixture(State(state): State<Arc<MockState>>, request: Request) -> impl IntoResponse {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let recorded = RecordedRequest {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        query: request.uri().query().map(str::to_string),
        authorization: header_value(&request, header::AUTHORIZATION),
        content_type: header_value(&request, header::CONTENT_TYPE),
    };
    state.requests.lock().unwrap().push(recorded);

    if let Some(delay) = state.delay {
        tokio::time::sleep(delay).await;
    }

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.clone(),
    )
}

/// A port nothing listens on.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
