use crate::client::OpenAIClient;
use crate::server::{cors, ApiError};
use crate::services::assistants::{CreateMessageRequest, CreateRunRequest};
use crate::streaming::{spawn_bridge, BridgeConfig};
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use bytes::Bytes;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;

pub const HEALTH_PATH: &str = "/health";
pub const CHAT_PATH: &str = "/chat";
pub const CHAT_STREAM_PATH: &str = "/chat/stream";
pub const THREAD_STREAM_PATH: &str = "/stream/:thread_id";

/// Header carrying the thread a streamed chat ran on.
pub const THREAD_ID_HEADER: &str = "x-thread-id";

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn OpenAIClient>,
    pub assistant_id: Arc<str>,
    pub bridge: BridgeConfig,
}

impl AppState {
    pub fn new(client: Arc<dyn OpenAIClient>, assistant_id: impl Into<String>) -> Self {
        Self {
            client,
            assistant_id: Arc::from(assistant_id.into()),
            bridge: BridgeConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub thread_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatResponse {
    pub thread_id: String,
    pub message: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(health))
        .route(CHAT_PATH, post(chat))
        .route(CHAT_STREAM_PATH, post(chat_stream))
        .route(THREAD_STREAM_PATH, get(thread_stream))
        .layer(middleware::from_fn(cors::allow_all))
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

/// Posts the message, creating a thread first when none was given.
async fn post_message(state: &AppState, request: ChatRequest) -> Result<String, ApiError> {
    if request.message.trim().is_empty() {
        return Err(ApiError::BadRequest("message must not be empty".to_string()));
    }

    let thread_id = match request.thread_id.filter(|id| !id.is_empty()) {
        Some(id) => id,
        None => state.client.threads().create().await?.id,
    };
    state
        .client
        .messages()
        .create(&thread_id, CreateMessageRequest::user(request.message))
        .await?;
    Ok(thread_id)
}

async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let thread_id = post_message(&state, request).await?;
    tracing::debug!(thread_id = %thread_id, "message received");
    Ok(Json(ChatResponse {
        thread_id,
        message: "message received...".to_string(),
    }))
}

async fn chat_stream(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Response, ApiError> {
    let thread_id = post_message(&state, request).await?;
    let events = state
        .client
        .runs()
        .create_stream(&thread_id, CreateRunRequest::new(state.assistant_id.as_ref()))
        .await?;

    let fragments = spawn_bridge(events, state.bridge.clone()).into_stream();
    let body = fragments.map(|item| {
        let chunk = match item {
            Ok(fragment) => fragment,
            Err(e) => format!("Error: {}\n", e),
        };
        Ok::<_, Infallible>(Bytes::from(chunk))
    });

    let mut response = Body::from_stream(body).into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    if let Ok(value) = HeaderValue::from_str(&thread_id) {
        headers.insert(THREAD_ID_HEADER, value);
    }
    Ok(response)
}

async fn thread_stream(
    State(state): State<AppState>,
    Path(thread_id): Path<String>,
) -> Result<Response, ApiError> {
    let events = state
        .client
        .runs()
        .create_stream(&thread_id, CreateRunRequest::new(state.assistant_id.as_ref()))
        .await?;

    let config = BridgeConfig {
        prefix: String::new(),
        ..state.bridge.clone()
    };
    let mut fragments = Box::pin(spawn_bridge(events, config).into_stream());
    let body = async_stream::stream! {
        while let Some(item) = fragments.next().await {
            match item {
                Ok(fragment) => yield Ok::<_, Infallible>(sse_frame(&fragment)),
                Err(e) => {
                    tracing::warn!(thread_id = %thread_id, error = %e, "run stream ended early");
                    break;
                }
            }
        }
    };

    let mut response = Body::from_stream(body).into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/event-stream"),
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    Ok(response)
}

pub(crate) fn sse_frame(fragment: &str) -> Bytes {
    Bytes::from(format!(
        "data: {}\n\n",
        serde_json::json!({ "message": fragment })
    ))
}
