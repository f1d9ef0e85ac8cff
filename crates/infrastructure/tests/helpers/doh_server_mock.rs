#![allow(dead_code)]
use super::a_answer;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use mydns_domain::Endpoint;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// How a mock upstream reacts to queries.
#[derive(Clone, Copy)]
pub enum MockBehavior {
    /// Answers every query with one A record
    Answer(Ipv4Addr),
    /// Replies with the given HTTP status and no body
    Status(u16),
    /// Answers after a delay
    Slow(Ipv4Addr, Duration),
}

struct MockState {
    behavior: MockBehavior,
    hits: AtomicUsize,
    last_query: Mutex<Option<Vec<u8>>>,
    last_content_type: Mutex<Option<String>>,
}

/// Local DoH upstream on 127.0.0.1 with an ephemeral port.
pub struct MockDohServer {
    addr: SocketAddr,
    state: Arc<MockState>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDohServer {
    pub async fn start(behavior: MockBehavior) -> Self {
        let state = Arc::new(MockState {
            behavior,
            hits: AtomicUsize::new(0),
            last_query: Mutex::new(None),
            last_content_type: Mutex::new(None),
        });

        let app = Router::new()
            .route("/dns-query", post(handle_query))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        Self {
            addr,
            state,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn url(&self) -> String {
        format!("http://{}/dns-query", self.addr)
    }

    pub fn endpoint(&self) -> Endpoint {
        Endpoint::parse("mock", &self.url()).unwrap()
    }

    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<Vec<u8>> {
        self.state.last_query.lock().unwrap().clone()
    }

    pub fn last_content_type(&self) -> Option<String> {
        self.state.last_content_type.lock().unwrap().clone()
    }
}

impl Drop for MockDohServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn handle_query(
    State(state): State<Arc<MockState>>,
    headers: axum::http::HeaderMap,
    body: Bytes,
) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    *state.last_query.lock().unwrap() = Some(body.to_vec());
    *state.last_content_type.lock().unwrap() = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let address = match state.behavior {
        MockBehavior::Status(code) => {
            return StatusCode::from_u16(code)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
                .into_response();
        }
        MockBehavior::Answer(address) => address,
        MockBehavior::Slow(address, delay) => {
            tokio::time::sleep(delay).await;
            address
        }
    };

    (
        [(header::CONTENT_TYPE, "application/dns-message")],
        a_answer(&body, address),
    )
        .into_response()
}

/// An address nothing listens on.
pub async fn closed_endpoint() -> Endpoint {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Endpoint::parse("closed", &format!("http://{}/dns-query", addr)).unwrap()
}
