#![allow(dead_code)]
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

pub const EXAMPLE_ADDRESS: [u8; 4] = [93, 184, 216, 34];

/// What the mock answers with. Defaults to a well-formed answer for
/// `example.com A 93.184.216.34` in whichever encoding was asked for.
#[derive(Clone, Default)]
pub struct MockBehavior {
    pub delay: Duration,
    pub status: Option<StatusCode>,
    pub wire_body: Option<Vec<u8>>,
    pub json_body: Option<String>,
}

impl MockBehavior {
    pub fn answering() -> Self {
        Self::default()
    }

    pub fn delayed(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    pub fn wire_body(body: Vec<u8>) -> Self {
        Self {
            wire_body: Some(body),
            ..Self::default()
        }
    }

    pub fn json_body(body: impl Into<String>) -> Self {
        Self {
            json_body: Some(body.into()),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }
}

/// What the mock saw, for assertions.
#[derive(Debug, Default, Clone)]
pub struct SeenRequest {
    pub method: String,
    pub content_type: Option<String>,
    pub accept: Option<String>,
    pub params: HashMap<String, String>,
    pub body: Vec<u8>,
}

#[derive(Clone)]
struct MockState {
    behavior: MockBehavior,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

/// Plain-HTTP DoH resolver on an ephemeral loopback port.
pub struct MockDohServer {
    addr: SocketAddr,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDohServer {
    pub async fn start(behavior: MockBehavior) -> Result<Self, std::io::Error> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let seen = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            behavior,
            seen: Arc::clone(&seen),
        };

        let app = Router::new()
            .route("/dns-query", post(answer_wire).get(answer_json))
            .with_state(state);

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        Ok(Self {
            addr,
            seen,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// `host:port`, as it appears in a resolver list.
    pub fn host(&self) -> String {
        self.addr.to_string()
    }

    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDohServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Accepts TCP connections and never writes a byte: TLS handshakes against it
/// stall until the client gives up.
pub struct SilentServer {
    addr: SocketAddr,
    task: tokio::task::JoinHandle<()>,
}

impl SilentServer {
    pub async fn start() -> Result<Self, std::io::Error> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let task = tokio::spawn(async move {
            let mut held: Vec<TcpStream> = Vec::new();
            while let Ok((stream, _)) = listener.accept().await {
                held.push(stream);
            }
        });

        Ok(Self { addr, task })
    }

    pub fn host(&self) -> String {
        self.addr.to_string()
    }
}

impl Drop for SilentServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Reads the request, then hangs up without answering.
pub struct HangupServer {
    addr: SocketAddr,
    task: tokio::task::JoinHandle<()>,
}

impl HangupServer {
    pub async fn start() -> Result<Self, std::io::Error> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let task = tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let mut buf = [0u8; 64];
                let _ = tokio::io::AsyncReadExt::read(&mut stream, &mut buf).await;
                drop(stream);
            }
        });

        Ok(Self { addr, task })
    }

    pub fn host(&self) -> String {
        self.addr.to_string()
    }
}

impl Drop for HangupServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Loopback address nothing listens on.
pub async fn refused_host() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr.to_string()
}

async fn answer_wire(State(state): State<MockState>, headers: HeaderMap, body: Bytes) -> Response {
    state.seen.lock().unwrap().push(SeenRequest {
        method: "POST".to_string(),
        content_type: header_value(&headers, header::CONTENT_TYPE),
        accept: header_value(&headers, header::ACCEPT),
        params: HashMap::new(),
        body: body.to_vec(),
    });

    tokio::time::sleep(state.behavior.delay).await;

    let payload = match &state.behavior.wire_body {
        Some(canned) => canned.clone(),
        None => build_wire_answer(&body),
    };

    (
        state.behavior.status.unwrap_or(StatusCode::OK),
        [(header::CONTENT_TYPE, "application/dns-message")],
        payload,
    )
        .into_response()
}

async fn answer_json(
    State(state): State<MockState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let name = params
        .get("name")
        .cloned()
        .unwrap_or_else(|| "example.com".to_string());

    state.seen.lock().unwrap().push(SeenRequest {
        method: "GET".to_string(),
        content_type: header_value(&headers, header::CONTENT_TYPE),
        accept: header_value(&headers, header::ACCEPT),
        params,
        body: Vec::new(),
    });

    tokio::time::sleep(state.behavior.delay).await;

    let payload = match &state.behavior.json_body {
        Some(canned) => canned.clone(),
        None => json_answer(&name),
    };

    (
        state.behavior.status.unwrap_or(StatusCode::OK),
        [(header::CONTENT_TYPE, "application/dns-json")],
        payload,
    )
        .into_response()
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

pub fn json_answer(name: &str) -> String {
    let fqdn = if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{}.", name)
    };
    serde_json::json!({
        "Status": 0,
        "TC": false,
        "RD": true,
        "RA": true,
        "Question": [{"name": fqdn, "type": 1}],
        "Answer": [{"name": fqdn, "type": 1, "TTL": 60, "data": "93.184.216.34"}]
    })
    .to_string()
}

/// Echo the question back with one `A 93.184.216.34` answer pointing at it.
/// Any EDNS OPT record in the query is not echoed.
pub fn build_wire_answer(query: &[u8]) -> Vec<u8> {
    if query.len() < 12 {
        return vec![];
    }

    let mut pos = 12;
    while pos < query.len() && query[pos] != 0 {
        pos += 1 + query[pos] as usize;
    }
    let question_end = (pos + 5).min(query.len());

    let mut response = Vec::with_capacity(512);
    response.extend_from_slice(&query[0..2]);
    response.push(0x81);
    response.push(0x80);
    response.extend_from_slice(&[0x00, 0x01]);
    response.extend_from_slice(&[0x00, 0x01]);
    response.extend_from_slice(&[0x00, 0x00]);
    response.extend_from_slice(&[0x00, 0x00]);
    response.extend_from_slice(&query[12..question_end]);
    response.extend_from_slice(&[
        0xc0, 0x0c, // pointer to question name
        0x00, 0x01, // A
        0x00, 0x01, // IN
        0x00, 0x00, 0x00, 0x3c, // TTL 60
        0x00, 0x04,
    ]);
    response.extend_from_slice(&EXAMPLE_ADDRESS);
    response
}
