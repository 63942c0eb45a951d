//! File fixtures

use serde_json::json;

pub fn file_object_response() -> serde_json::Value {
    json!({
        "id": "file-abc123",
        "object": "file",
        "bytes": 120000,
        "created_at": 1677610602,
        "filename": "goog-10k.pdf",
        "purpose": "assistants",
        "status": "processed"
    })
}

pub fn list_files_response() -> serde_json::Value {
    json!({
        "data": [
            {
                "id": "file-abc123",
                "object": "file",
                "bytes": 120000,
                "created_at": 1677610602,
                "filename": "goog-10k.pdf",
                "purpose": "assistants"
            },
            {
                "id": "file-xyz789",
                "object": "file",
                "bytes": 85000,
                "created_at": 1677610603,
                "filename": "brka-10k.txt",
                "purpose": "assistants"
            }
        ],
        "object": "list"
    })
}

pub fn file_deleted_response() -> serde_json::Value {
    json!({
        "id": "file-abc123",
        "object": "file",
        "deleted": true
    })
}
