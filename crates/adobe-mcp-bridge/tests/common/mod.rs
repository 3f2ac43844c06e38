//! Simulated proxies for integration tests.

#![allow(dead_code)] // Each test binary uses a subset of the helpers

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// Reply decision for one request: `None` means never answer.
pub type Reply = Option<(StatusCode, String)>;

type ReplyFn = Arc<dyn Fn(&Value) -> Reply + Send + Sync>;

#[derive(Clone)]
struct ProxyState {
    reply: ReplyFn,
    requests: Arc<Mutex<Vec<Value>>>,
}

/// A running HTTP proxy stand-in.
pub struct HttpProxy {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<Value>>>,
}

impl HttpProxy {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Request frames received so far.
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }
}

/// Start an HTTP proxy answering `POST /command` with `reply`.
pub async fn spawn_http_proxy<F>(reply: F) -> HttpProxy
where
    F: Fn(&Value) -> Reply + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));

    let state = ProxyState {
        reply: Arc::new(reply),
        requests: Arc::clone(&requests),
    };
    let app = Router::new()
        .route("/command", post(handle_command))
        .with_state(state);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    HttpProxy { addr, requests }
}

async fn handle_command(State(state): State<ProxyState>, Json(frame): Json<Value>) -> Response {
    state.requests.lock().unwrap().push(frame.clone());
    match (state.reply)(&frame) {
        Some((status, body)) => (status, body).into_response(),
        None => std::future::pending::<Response>().await,
    }
}

/// `status=ok` reply for the request's id.
pub fn ok(frame: &Value, result: Value) -> Reply {
    Some((
        StatusCode::OK,
        json!({"id": frame["id"], "status": "ok", "result": result}).to_string(),
    ))
}

/// `status=error` reply for the request's id.
pub fn app_error(frame: &Value, kind: &str, message: &str) -> Reply {
    Some((
        StatusCode::OK,
        json!({"id": frame["id"], "status": "error", "error": {"kind": kind, "message": message}})
            .to_string(),
    ))
}

/// An address nothing is listening on.
pub async fn dead_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
