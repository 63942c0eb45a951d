//! Typed services against the mock server

use super::*;
use integrations_openai_assistants::types::PaginationParams;

#[tokio::test]
async fn test_create_assistant_sends_tools() {
    let server = MockServer::start().await;
    authed("POST", "/assistants")
        .respond_with(success_response(json!({
            "id": "asst_abc123",
            "object": "assistant",
            "created_at": 1698984975,
            "name": "Math Tutor",
            "description": null,
            "model": "gpt-4o",
            "instructions": "You are a personal math tutor.",
            "tools": [{"type": "code_interpreter"}],
            "metadata": {}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let assistant = client
        .assistants()
        .create(
            CreateAssistantRequest::new("gpt-4o")
                .with_name("Math Tutor")
                .with_tool(AssistantTool::code_interpreter()),
        )
        .await
        .unwrap();

    assert_eq!(assistant.id, "asst_abc123");
    assert_eq!(assistant.tools, vec![AssistantTool::code_interpreter()]);
}

#[tokio::test]
async fn test_list_messages_with_pagination() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/threads/thread_abc123/messages"))
        .and(wiremock::matchers::query_param("limit", "2"))
        .respond_with(success_response(json!({
            "object": "list",
            "data": [
                message_body("msg_2", "assistant", "x = 5/3"),
                message_body("msg_1", "user", "3x + 9 = 14")
            ],
            "first_id": "msg_2",
            "last_id": "msg_1",
            "has_more": false
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let page = client
        .messages()
        .list("thread_abc123", PaginationParams::new().with_limit(2))
        .await
        .unwrap();

    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[0].text(), "x = 5/3");
}

#[tokio::test]
async fn test_not_found_maps_to_request_error() {
    let server = MockServer::start().await;
    authed("GET", "/threads/thread_missing")
        .respond_with(error_response(
            404,
            "No thread found with id 'thread_missing'.",
            "invalid_request_error",
        ))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = client
        .threads()
        .retrieve("thread_missing")
        .await
        .unwrap_err();

    assert!(error.is_not_found());
    assert!(error.to_string().contains("thread_missing"));
}

#[tokio::test]
async fn test_invalid_key_maps_to_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/assistants/asst_abc123"))
        .respond_with(error_response(
            401,
            "Incorrect API key provided.",
            "invalid_request_error",
        ))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = client.assistants().retrieve("asst_abc123").await.unwrap_err();

    assert!(error.is_authentication_error());
    assert!(!error.is_retryable());
}

#[tokio::test]
async fn test_rate_limit_carries_retry_after() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/threads"))
        .respond_with(
            error_response(429, "Rate limit reached", "requests").insert_header("retry-after", "7"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = client.threads().create().await.unwrap_err();

    assert!(error.is_rate_limit_error());
    match error {
        OpenAIError::RateLimit(rate) => assert_eq!(rate.retry_after(), Some(7)),
        other => panic!("expected a rate limit error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/assistants"))
        .respond_with(error_response(503, "overloaded", "server_error"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/assistants"))
        .respond_with(success_response(json!({"object": "list", "data": [], "has_more": false})))
        .mount(&server)
        .await;

    let client = OpenAIClientBuilder::new()
        .with_config(test_config(&server).with_max_retries(1))
        .build()
        .unwrap();

    assert!(client.health_check().await.unwrap());
}
