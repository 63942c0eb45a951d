//! Assistant stream fixtures
//!
//! Raw server-sent events in the order the provider emits them for a short
//! code interpreter run.

use crate::transport::SseEvent;
use serde_json::json;

fn event(name: &str, data: serde_json::Value) -> SseEvent {
    SseEvent::new(name, data.to_string())
}

pub fn message_delta_event(message_id: &str, index: u32, value: &str) -> SseEvent {
    event(
        "thread.message.delta",
        json!({
            "id": message_id,
            "object": "thread.message.delta",
            "delta": {"content": [{"index": index, "type": "text", "text": {"value": value}}]}
        }),
    )
}

pub fn code_input_delta_event(step_id: &str, index: u32, input: &str) -> SseEvent {
    event(
        "thread.run.step.delta",
        json!({
            "id": step_id,
            "object": "thread.run.step.delta",
            "delta": {"step_details": {"type": "tool_calls", "tool_calls": [
                {"index": index, "id": "call_ci", "type": "code_interpreter",
                 "code_interpreter": {"input": input, "outputs": []}}
            ]}}
        }),
    )
}

pub fn code_logs_delta_event(step_id: &str, index: u32, logs: &str) -> SseEvent {
    event(
        "thread.run.step.delta",
        json!({
            "id": step_id,
            "object": "thread.run.step.delta",
            "delta": {"step_details": {"type": "tool_calls", "tool_calls": [
                {"index": index, "type": "code_interpreter",
                 "code_interpreter": {"outputs": [{"index": 0, "type": "logs", "logs": logs}]}}
            ]}}
        }),
    )
}

pub fn message_completed_event(message_id: &str, text: &str) -> SseEvent {
    event(
        "thread.message.completed",
        json!({
            "id": message_id,
            "object": "thread.message",
            "created_at": 1699017620,
            "thread_id": "thread_abc123",
            "role": "assistant",
            "assistant_id": "asst_abc123",
            "run_id": "run_abc123",
            "status": "completed",
            "content": [{"type": "text", "text": {"value": text, "annotations": []}}]
        }),
    )
}

pub fn run_event(name: &str, status: &str) -> SseEvent {
    event(name, super::run_json(status))
}

pub fn done_event() -> SseEvent {
    SseEvent::new("done", "[DONE]")
}

/// Text answer preceded by one code interpreter call.
pub fn code_interpreter_run_events() -> Vec<SseEvent> {
    vec![
        run_event("thread.run.created", "queued"),
        run_event("thread.run.in_progress", "in_progress"),
        code_input_delta_event("step_1", 0, ""),
        code_input_delta_event("step_1", 0, "print(14 - 9"),
        code_input_delta_event("step_1", 0, ")"),
        code_logs_delta_event("step_1", 0, "5"),
        message_delta_event("msg_1", 0, "x = "),
        message_delta_event("msg_1", 0, "5/3"),
        message_completed_event("msg_1", "x = 5/3"),
        run_event("thread.run.completed", "completed"),
        done_event(),
    ]
}
