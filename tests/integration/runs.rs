//! Polling and function calling against the mock server

use super::*;
use integrations_openai_assistants::replies::latest_assistant_response;
use integrations_openai_assistants::types::PaginationParams;
use integrations_openai_assistants::RunStatus;
use wiremock::matchers::body_partial_json;

#[tokio::test]
async fn test_quickstart_flow_polls_until_completed() {
    let server = MockServer::start().await;
    authed("POST", "/threads/thread_abc123/messages")
        .respond_with(success_response(message_body("msg_1", "user", "3x + 9 = 14")))
        .mount(&server)
        .await;
    authed("POST", "/threads/thread_abc123/runs")
        .and(body_partial_json(json!({"assistant_id": "asst_abc123"})))
        .respond_with(success_response(run_body("queued")))
        .expect(1)
        .mount(&server)
        .await;
    authed("GET", "/threads/thread_abc123/runs/run_abc123")
        .respond_with(success_response(run_body("in_progress")))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    authed("GET", "/threads/thread_abc123/runs/run_abc123")
        .respond_with(success_response(run_body("completed")))
        .mount(&server)
        .await;
    authed("GET", "/threads/thread_abc123/messages")
        .respond_with(success_response(json!({
            "object": "list",
            "data": [
                message_body("msg_2", "assistant", "x = 5/3"),
                message_body("msg_1", "user", "3x + 9 = 14")
            ],
            "has_more": false
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .messages()
        .create("thread_abc123", CreateMessageRequest::user("3x + 9 = 14"))
        .await
        .unwrap();
    let run = client
        .runs()
        .create("thread_abc123", CreateRunRequest::new("asst_abc123"))
        .await
        .unwrap();

    let outcome = client
        .run_poller()
        .poll("thread_abc123", &run.id)
        .await
        .unwrap();
    let run = outcome.into_settled().unwrap();
    assert_eq!(run.status, RunStatus::Completed);

    let messages = client
        .messages()
        .list("thread_abc123", PaginationParams::new())
        .await
        .unwrap();
    let reply = latest_assistant_response(&messages.data).map(|m| m.text());
    assert_eq!(reply.as_deref(), Some("x = 5/3"));
}

#[tokio::test]
async fn test_poll_budget_exhaustion_returns_last_run() {
    let server = MockServer::start().await;
    authed("GET", "/threads/thread_abc123/runs/run_abc123")
        .respond_with(success_response(run_body("in_progress")))
        .mount(&server)
        .await;

    let config = test_config(&server).with_poll_config(
        PollConfig::default()
            .with_initial_delay(Duration::from_millis(10))
            .with_max_elapsed(Duration::from_millis(100)),
    );
    let client = OpenAIClientBuilder::new().with_config(config).build().unwrap();

    let outcome = client
        .run_poller()
        .poll("thread_abc123", "run_abc123")
        .await
        .unwrap();

    assert!(!outcome.is_settled());
    assert_eq!(outcome.resource().status, RunStatus::InProgress);
    assert!(outcome.into_settled().is_err());
}

#[tokio::test]
async fn test_function_calls_are_submitted_as_one_batch() {
    let server = MockServer::start().await;
    let mut requires_action = run_body("requires_action");
    requires_action["required_action"] = json!({
        "type": "submit_tool_outputs",
        "submit_tool_outputs": {"tool_calls": [
            {"id": "call_temp", "type": "function",
             "function": {"name": "get_current_temperature", "arguments": "{\"location\":\"San Francisco, CA\",\"unit\":\"Fahrenheit\"}"}},
            {"id": "call_rain", "type": "function",
             "function": {"name": "get_rain_probability", "arguments": "{\"location\":\"San Francisco, CA\"}"}}
        ]}
    });

    authed("POST", "/threads/thread_abc123/runs")
        .respond_with(success_response(run_body("queued")))
        .mount(&server)
        .await;
    authed("GET", "/threads/thread_abc123/runs/run_abc123")
        .respond_with(success_response(requires_action))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    authed("POST", "/threads/thread_abc123/runs/run_abc123/submit_tool_outputs")
        .and(body_partial_json(json!({"tool_outputs": [
            {"tool_call_id": "call_temp", "output": "57"},
            {"tool_call_id": "call_rain", "output": "0.06"}
        ]})))
        .respond_with(success_response(run_body("queued")))
        .expect(1)
        .mount(&server)
        .await;
    authed("GET", "/threads/thread_abc123/runs/run_abc123")
        .respond_with(success_response(run_body("completed")))
        .mount(&server)
        .await;

    let mut tools = ToolRegistry::new();
    tools
        .register_sync("get_current_temperature", |_| Ok("57".to_string()))
        .register_sync("get_rain_probability", |_| Ok("0.06".to_string()));

    let client = client_for(&server);
    let outcome = client
        .run_driver(&tools)
        .create_and_run("thread_abc123", CreateRunRequest::new("asst_abc123"))
        .await
        .unwrap();

    assert_eq!(outcome.into_settled().unwrap().status, RunStatus::Completed);
}

#[tokio::test]
async fn test_unknown_function_submits_nothing() {
    let server = MockServer::start().await;
    let mut requires_action = run_body("requires_action");
    requires_action["required_action"] = json!({
        "type": "submit_tool_outputs",
        "submit_tool_outputs": {"tool_calls": [
            {"id": "call_1", "type": "function",
             "function": {"name": "launch_rocket", "arguments": "{}"}}
        ]}
    });
    authed("GET", "/threads/thread_abc123/runs/run_abc123")
        .respond_with(success_response(requires_action))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/threads/thread_abc123/runs/run_abc123/submit_tool_outputs"))
        .respond_with(success_response(run_body("queued")))
        .expect(0)
        .mount(&server)
        .await;

    let tools = ToolRegistry::new();
    let client = client_for(&server);
    let error = client
        .run_driver(&tools)
        .run_to_completion("thread_abc123", "run_abc123")
        .await
        .unwrap_err();

    assert!(matches!(error, OpenAIError::Tool(_)));
}
