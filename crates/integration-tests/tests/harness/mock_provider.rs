//! Mock Groq and Gemini backends for integration tests
//!
//! Each mock speaks just enough of its provider's wire format to answer a
//! single completion, and counts the calls it receives

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

/// Which provider the mock imitates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    Groq,
    Gemini,
}

/// Mock provider backend returning canned completions
pub struct MockProvider {
    addr: SocketAddr,
    flavor: Flavor,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    flavor: Flavor,
    call_count: AtomicU32,
    /// Number of requests to fail before succeeding (0 = never fail)
    fail_count: AtomicU32,
    /// Delay before answering
    delay: Option<Duration>,
    /// Completion text returned on success
    content: String,
    /// Body of the most recent request
    last_body: Mutex<Option<Value>>,
    /// Credential presented with the most recent request
    last_key: Mutex<Option<String>>,
}

impl MockProvider {
    /// Start a mock that answers with a small JSON verdict
    pub async fn start(flavor: Flavor) -> anyhow::Result<Self> {
        let content = match flavor {
            Flavor::Groq => r#"{"verdict":"soulmates","score":9}"#,
            Flavor::Gemini => r#"{"verdict":"slow burn","score":6}"#,
        };
        Self::start_inner(flavor, 0, None, content).await
    }

    /// Start a mock that fails the first `n` requests
    pub async fn start_failing(flavor: Flavor, n: u32) -> anyhow::Result<Self> {
        Self::start_inner(flavor, n, None, "{}").await
    }

    /// Start a mock with custom completion text
    pub async fn start_with_response(flavor: Flavor, content: &str) -> anyhow::Result<Self> {
        Self::start_inner(flavor, 0, None, content).await
    }

    /// Start a mock that waits `delay` before every answer
    pub async fn start_slow(flavor: Flavor, delay: Duration) -> anyhow::Result<Self> {
        Self::start_inner(flavor, 0, Some(delay), "{}").await
    }

    async fn start_inner(
        flavor: Flavor,
        fail_count: u32,
        delay: Option<Duration>,
        content: &str,
    ) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            flavor,
            call_count: AtomicU32::new(0),
            fail_count: AtomicU32::new(fail_count),
            delay,
            content: content.to_owned(),
            last_body: Mutex::new(None),
            last_key: Mutex::new(None),
        });

        let app = match flavor {
            Flavor::Groq => Router::new().route("/openai/v1/chat/completions", routing::post(handle_groq)),
            Flavor::Gemini => Router::new().route("/v1beta/models/{action}", routing::post(handle_gemini)),
        }
        .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self {
            addr,
            flavor,
            shutdown,
            state,
        })
    }

    /// Base URL for configuring the mock as a provider
    pub fn base_url(&self) -> String {
        match self.flavor {
            Flavor::Groq => format!("http://{}/openai/v1", self.addr),
            Flavor::Gemini => format!("http://{}/v1beta", self.addr),
        }
    }

    /// Number of completion requests received
    pub fn call_count(&self) -> u32 {
        self.state.call_count.load(Ordering::Relaxed)
    }

    /// Body of the most recent request
    pub fn last_body(&self) -> Option<Value> {
        self.state.last_body.lock().expect("lock").clone()
    }

    /// Credential of the most recent request
    pub fn last_key(&self) -> Option<String> {
        self.state.last_key.lock().expect("lock").clone()
    }
}

impl Drop for MockProvider {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

impl MockState {
    /// Count the call, remember what was sent, and decide whether to fail
    async fn record(&self, key: Option<String>, body: Value) -> bool {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_key.lock().expect("lock") = key;
        *self.last_body.lock().expect("lock") = Some(body);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        // If fail_count > 0, decrement and fail this request
        self.fail_count
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1))
            .is_ok()
    }
}

async fn handle_groq(State(state): State<Arc<MockState>>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    assert_eq!(state.flavor, Flavor::Groq);

    let key = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_owned);

    if state.record(key, body).await {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": {
                    "message": "mock groq intentional failure",
                    "type": "server_error",
                    "code": 500
                }
            })),
        )
            .into_response();
    }

    Json(json!({
        "id": "chatcmpl-mock",
        "object": "chat.completion",
        "model": "llama-3.3-70b-versatile",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": state.content},
            "finish_reason": "stop"
        }]
    }))
    .into_response()
}

async fn handle_gemini(
    State(state): State<Arc<MockState>>,
    Path(action): Path<String>,
    Query(query): Query<std::collections::HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Response {
    assert_eq!(state.flavor, Flavor::Gemini);

    if !action.ends_with(":generateContent") {
        return StatusCode::NOT_FOUND.into_response();
    }

    if state.record(query.get("key").cloned(), body).await {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "error": {
                    "code": 503,
                    "message": "mock gemini intentional failure",
                    "status": "UNAVAILABLE"
                }
            })),
        )
            .into_response();
    }

    Json(json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": state.content}]},
            "finishReason": "STOP"
        }]
    }))
    .into_response()
}
