//! Error response fixtures

use serde_json::json;

pub fn error_401_invalid_api_key() -> serde_json::Value {
    json!({
        "error": {
            "message": "Incorrect API key provided: sk-invalid. You can find your API key at https://platform.openai.com/account/api-keys.",
            "type": "invalid_request_error",
            "param": null,
            "code": "invalid_api_key"
        }
    })
}

pub fn error_404_thread_not_found() -> serde_json::Value {
    json!({
        "error": {
            "message": "No thread found with id 'thread_missing'.",
            "type": "invalid_request_error",
            "param": null,
            "code": null
        }
    })
}

/// Posting to a thread that still has an active run.
pub fn error_400_run_active() -> serde_json::Value {
    json!({
        "error": {
            "message": "Can't add messages to thread_abc123 while a run run_abc123 is active.",
            "type": "invalid_request_error",
            "param": null,
            "code": null
        }
    })
}

pub fn error_429_rate_limit() -> serde_json::Value {
    json!({
        "error": {
            "message": "Rate limit reached for requests",
            "type": "rate_limit_error",
            "param": null,
            "code": "rate_limit_exceeded"
        }
    })
}

pub fn error_500_internal_server_error() -> serde_json::Value {
    json!({
        "error": {
            "message": "The server had an error while processing your request. Sorry about that!",
            "type": "server_error",
            "param": null,
            "code": null
        }
    })
}
