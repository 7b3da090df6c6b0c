//! Mock LLM backend server for integration tests
//!
//! Serves minimal OpenAI chat-completions and Anthropic messages endpoints
//! that answer with a listing JSON object naming the requested platform.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde::Deserialize;
use serde_json::json;
use tokio_util::sync::CancellationToken;

/// Mock LLM backend that returns predictable listings
pub struct MockLlm {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockLlmState>,
}

struct MockLlmState {
    chat_count: AtomicU32,
    messages_count: AtomicU32,
    /// Answer every request with 500 when set
    failing: AtomicBool,
    /// Vendor model names seen, in arrival order
    models: Mutex<Vec<String>>,
    /// Message count of each request, in arrival order
    message_counts: Mutex<Vec<usize>>,
}

impl MockLlm {
    /// Start the mock server, returning immediately
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(false).await
    }

    /// Start a mock server that fails every request with 500
    pub async fn start_failing() -> anyhow::Result<Self> {
        Self::start_inner(true).await
    }

    async fn start_inner(failing: bool) -> anyhow::Result<Self> {
        let state = Arc::new(MockLlmState {
            chat_count: AtomicU32::new(0),
            messages_count: AtomicU32::new(0),
            failing: AtomicBool::new(failing),
            models: Mutex::new(Vec::new()),
            message_counts: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1/chat/completions", routing::post(handle_chat_completions))
            .route("/v1/messages", routing::post(handle_messages))
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

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as a provider
    ///
    /// Includes `/v1` since clients append paths like `/chat/completions`
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Number of OpenAI-style requests received
    pub fn chat_count(&self) -> u32 {
        self.state.chat_count.load(Ordering::Relaxed)
    }

    /// Number of Anthropic-style requests received
    pub fn messages_count(&self) -> u32 {
        self.state.messages_count.load(Ordering::Relaxed)
    }

    /// Vendor model names requested so far
    pub fn models(&self) -> Vec<String> {
        self.state.models.lock().unwrap().clone()
    }

    /// Number of messages carried by each request so far
    pub fn message_counts(&self) -> Vec<usize> {
        self.state.message_counts.lock().unwrap().clone()
    }
}

impl Drop for MockLlm {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

#[derive(Debug, Deserialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<Message>,
}

#[derive(Debug, Deserialize)]
struct Message {
    role: String,
    content: String,
}

impl MockLlmState {
    fn record(&self, request: &CompletionRequest) {
        self.models.lock().unwrap().push(request.model.clone());
        self.message_counts.lock().unwrap().push(request.messages.len());
    }
}

impl CompletionRequest {
    fn prompt(&self) -> &str {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == "user")
            .map_or("", |m| m.content.as_str())
    }
}

async fn handle_chat_completions(
    State(state): State<Arc<MockLlmState>>,
    Json(request): Json<CompletionRequest>,
) -> Response {
    state.chat_count.fetch_add(1, Ordering::Relaxed);
    state.record(&request);

    if state.failing.load(Ordering::Relaxed) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "mock failure").into_response();
    }

    let reply = format!("Here is the optimized listing:\n{}", listing_for(request.prompt()));

    Json(json!({
        "id": "chatcmpl-mock",
        "object": "chat.completion",
        "model": request.model,
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": reply},
            "finish_reason": "stop"
        }]
    }))
    .into_response()
}

async fn handle_messages(State(state): State<Arc<MockLlmState>>, Json(request): Json<CompletionRequest>) -> Response {
    state.messages_count.fetch_add(1, Ordering::Relaxed);
    state.record(&request);

    if state.failing.load(Ordering::Relaxed) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "mock failure").into_response();
    }

    Json(json!({
        "id": "msg_mock",
        "type": "message",
        "role": "assistant",
        "model": request.model,
        "content": [{"type": "text", "text": listing_for(request.prompt())}],
        "stop_reason": "end_turn"
    }))
    .into_response()
}

/// Listing JSON naming the platform the prompt targets
fn listing_for(prompt: &str) -> String {
    let platform = ["shopify", "etsy", "amazon"]
        .into_iter()
        .find(|p| prompt.contains(&format!("Platform: {p}")))
        .unwrap_or("unknown");

    json!({
        "title": format!("Mock {platform} title"),
        "description": format!("Mock {platform} description"),
        "tags": ["mock", platform],
        "category": "Accessories",
        "seoMetadata": {"metaTitle": "Mock SEO title", "metaDescription": "Mock SEO description"},
        "bulletPoints": ["Mock bullet one", "Mock bullet two"]
    })
    .to_string()
}
