//! Event-stream runs against the mock server

use super::*;
use integrations_openai_assistants::streaming::{spawn_bridge, BridgeConfig};
use wiremock::matchers::body_partial_json;

fn sse(events: &[(&str, serde_json::Value)]) -> ResponseTemplate {
    let mut body = String::new();
    for (name, data) in events {
        body.push_str(&format!("event: {}\ndata: {}\n\n", name, data));
    }
    body.push_str("event: done\ndata: [DONE]\n\n");
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/event-stream")
        .set_body_string(body)
}

fn text_delta(value: &str) -> (&'static str, serde_json::Value) {
    (
        "thread.message.delta",
        json!({"id": "msg_1", "object": "thread.message.delta",
               "delta": {"content": [{"index": 0, "type": "text", "text": {"value": value}}]}}),
    )
}

fn completed_message(text: &str, annotations: serde_json::Value) -> (&'static str, serde_json::Value) {
    let mut message = message_body("msg_1", "assistant", text);
    message["content"][0]["text"]["annotations"] = annotations;
    ("thread.message.completed", message)
}

#[tokio::test]
async fn test_streamed_run_aggregates_text_and_citations() {
    let server = MockServer::start().await;
    authed("POST", "/threads/thread_abc123/runs")
        .and(body_partial_json(json!({"stream": true})))
        .respond_with(sse(&[
            ("thread.run.created", run_body("queued")),
            text_delta("Revenue grew 9%"),
            text_delta("【4:0†source】."),
            completed_message(
                "Revenue grew 9%【4:0†source】.",
                json!([{
                    "type": "file_citation",
                    "text": "【4:0†source】",
                    "file_citation": {"file_id": "file-goog"},
                    "start_index": 15,
                    "end_index": 27
                }]),
            ),
            ("thread.run.completed", run_body("completed")),
        ]))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let stream = client
        .runs()
        .create_stream("thread_abc123", CreateRunRequest::new("asst_abc123"))
        .await
        .unwrap();

    let mut aggregator = StreamAggregator::new();
    let mut fragments = Vec::new();
    aggregator
        .drain_with(stream, |fragment| fragments.push(fragment.to_string()))
        .await
        .unwrap();
    let result = aggregator.finish();

    assert_eq!(
        fragments,
        vec!["assistant > ", "Revenue grew 9%", "【4:0†source】.", "\n"]
    );
    assert_eq!(result.messages, vec!["Revenue grew 9%[0]."]);
    assert_eq!(result.file_ids, vec!["file-goog"]);
    assert!(result.completed);
    assert_eq!(
        result.last_run.map(|run| run.status),
        Some(integrations_openai_assistants::RunStatus::Completed)
    );
}

#[tokio::test]
async fn test_error_event_ends_stream_with_error() {
    let server = MockServer::start().await;
    authed("POST", "/threads/thread_abc123/runs")
        .respond_with(sse(&[
            text_delta("partial"),
            ("error", json!({"message": "The server had an error", "type": "server_error"})),
        ]))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let stream = client
        .runs()
        .create_stream("thread_abc123", CreateRunRequest::new("asst_abc123"))
        .await
        .unwrap();

    let mut handle = spawn_bridge(stream, BridgeConfig::default());
    let mut items = Vec::new();
    while let Some(item) = handle.recv().await {
        items.push(item);
    }

    assert_eq!(items.len(), 3);
    assert_eq!(items[1].as_deref().ok(), Some("partial"));
    assert!(items[2].is_err());
}

#[tokio::test]
async fn test_rejected_stream_request_maps_status() {
    let server = MockServer::start().await;
    authed("POST", "/threads/thread_abc123/runs")
        .respond_with(error_response(
            400,
            "Thread thread_abc123 already has an active run run_old.",
            "invalid_request_error",
        ))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client
        .runs()
        .create_stream("thread_abc123", CreateRunRequest::new("asst_abc123"))
        .await;

    assert!(matches!(result, Err(OpenAIError::Validation(_))));
}
