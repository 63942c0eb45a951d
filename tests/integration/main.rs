//! Integration tests using WireMock
//!
//! These tests drive the real reqwest transport against a mock server:
//! request paths and headers, JSON and event-stream decoding, and error
//! mapping.

mod files;
mod runs;
mod services;
mod streaming;

use integrations_openai_assistants::prelude::*;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_KEY: &str = "sk-test-api-key";

pub fn test_config(server: &MockServer) -> OpenAIConfig {
    OpenAIConfig::new(API_KEY)
        .with_base_url(Url::parse(&server.uri()).unwrap())
        .with_max_retries(0)
        .with_poll_config(
            PollConfig::default()
                .with_initial_delay(Duration::from_millis(5))
                .with_max_delay(Duration::from_millis(20))
                .with_max_elapsed(Duration::from_secs(5)),
        )
}

pub fn client_for(server: &MockServer) -> Arc<dyn OpenAIClient> {
    OpenAIClientBuilder::new()
        .with_config(test_config(server))
        .build()
        .expect("client builds")
}

/// Matches requests carrying the key and the assistants beta header.
pub fn authed(http_method: &str, request_path: &str) -> wiremock::MockBuilder {
    Mock::given(method(http_method))
        .and(path(request_path))
        .and(header("Authorization", format!("Bearer {}", API_KEY).as_str()))
        .and(header("OpenAI-Beta", "assistants=v2"))
}

pub fn success_response(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

pub fn error_response(status: u16, message: &str, error_type: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "error": {"message": message, "type": error_type, "param": null, "code": null}
    }))
}

pub fn run_body(status: &str) -> serde_json::Value {
    json!({
        "id": "run_abc123",
        "object": "thread.run",
        "created_at": 1699063290,
        "assistant_id": "asst_abc123",
        "thread_id": "thread_abc123",
        "status": status,
        "model": "gpt-4o",
        "tools": []
    })
}

pub fn message_body(id: &str, role: &str, text: &str) -> serde_json::Value {
    json!({
        "id": id,
        "object": "thread.message",
        "created_at": 1699017614,
        "thread_id": "thread_abc123",
        "role": role,
        "content": [{"type": "text", "text": {"value": text, "annotations": []}}],
        "attachments": []
    })
}
