//! Assistant, thread, message and run fixtures

use crate::services::assistants::{Run, RunStatus};
use serde_json::json;

pub fn assistant_response() -> serde_json::Value {
    json!({
        "id": "asst_abc123",
        "object": "assistant",
        "created_at": 1698984975,
        "name": "Math Tutor",
        "description": null,
        "model": "gpt-4o",
        "instructions": "You are a personal math tutor. Write and run code to answer math questions.",
        "tools": [{"type": "code_interpreter"}],
        "metadata": {},
        "temperature": 1.0,
        "top_p": 1.0
    })
}

pub fn thread_response() -> serde_json::Value {
    json!({
        "id": "thread_abc123",
        "object": "thread",
        "created_at": 1699012949,
        "metadata": {},
        "tool_resources": {}
    })
}

pub fn user_message_json(id: &str, text: &str) -> serde_json::Value {
    json!({
        "id": id,
        "object": "thread.message",
        "created_at": 1699017614,
        "thread_id": "thread_abc123",
        "role": "user",
        "content": [{"type": "text", "text": {"value": text, "annotations": []}}],
        "attachments": [],
        "metadata": {}
    })
}

pub fn assistant_message_json(id: &str, text: &str) -> serde_json::Value {
    json!({
        "id": id,
        "object": "thread.message",
        "created_at": 1699017620,
        "thread_id": "thread_abc123",
        "role": "assistant",
        "assistant_id": "asst_abc123",
        "run_id": "run_abc123",
        "content": [{"type": "text", "text": {"value": text, "annotations": []}}],
        "attachments": [],
        "metadata": {}
    })
}

/// Newest first, as the provider lists them.
pub fn message_list_response() -> serde_json::Value {
    json!({
        "object": "list",
        "data": [
            assistant_message_json("msg_3", "The solution is x = 5/3."),
            user_message_json("msg_2", "I need to solve the equation `3x + 11 = 14`. Can you help me?"),
            assistant_message_json("msg_1", "Hello, how can I help?")
        ],
        "first_id": "msg_3",
        "last_id": "msg_1",
        "has_more": false
    })
}

pub fn run_json(status: &str) -> serde_json::Value {
    json!({
        "id": "run_abc123",
        "object": "thread.run",
        "created_at": 1699063290,
        "assistant_id": "asst_abc123",
        "thread_id": "thread_abc123",
        "status": status,
        "started_at": 1699063290,
        "expires_at": null,
        "model": "gpt-4o",
        "instructions": null,
        "tools": [{"type": "code_interpreter"}],
        "metadata": {},
        "usage": null
    })
}

pub fn run_requires_action_json(calls: &[(&str, &str, &str)]) -> serde_json::Value {
    let tool_calls: Vec<serde_json::Value> = calls
        .iter()
        .map(|(id, name, arguments)| {
            json!({"id": id, "type": "function", "function": {"name": name, "arguments": arguments}})
        })
        .collect();
    let mut run = run_json("requires_action");
    run["required_action"] = json!({
        "type": "submit_tool_outputs",
        "submit_tool_outputs": {"tool_calls": tool_calls}
    });
    run
}

pub fn run_with_status(status: RunStatus) -> Run {
    serde_json::from_value(run_json(status.as_str())).expect("valid run fixture")
}

pub fn run_requiring(calls: &[(&str, &str, &str)]) -> Run {
    serde_json::from_value(run_requires_action_json(calls)).expect("valid run fixture")
}

pub fn vector_store_response() -> serde_json::Value {
    json!({
        "id": "vs_abc123",
        "object": "vector_store",
        "created_at": 1699061776,
        "name": "Financial Statements",
        "status": "completed",
        "usage_bytes": 139920,
        "file_counts": {"in_progress": 0, "completed": 2, "failed": 0, "cancelled": 0, "total": 2}
    })
}

pub fn file_batch_json(status: &str) -> serde_json::Value {
    json!({
        "id": "vsfb_abc123",
        "object": "vector_store.file_batch",
        "created_at": 1699061776,
        "vector_store_id": "vs_abc123",
        "status": status,
        "file_counts": {"in_progress": 0, "completed": 2, "failed": 0, "cancelled": 0, "total": 2}
    })
}
