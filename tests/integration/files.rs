//! File uploads, downloads and vector store indexing against the mock server

use super::*;
use integrations_openai_assistants::services::assistants::{
    CreateVectorStoreRequest, FileBatchStatus,
};
use integrations_openai_assistants::{FilePurpose, FileUploadRequest};
use wiremock::matchers::body_string_contains;

fn file_body(id: &str, filename: &str) -> serde_json::Value {
    json!({
        "id": id,
        "object": "file",
        "bytes": 120000,
        "created_at": 1677610602,
        "filename": filename,
        "purpose": "assistants"
    })
}

fn batch_body(status: &str) -> serde_json::Value {
    json!({
        "id": "vsfb_abc123",
        "object": "vector_store.file_batch",
        "created_at": 1699061776,
        "vector_store_id": "vs_abc123",
        "status": status,
        "file_counts": {"in_progress": 0, "completed": 2, "failed": 0, "cancelled": 0, "total": 2}
    })
}

#[tokio::test]
async fn test_upload_sends_multipart_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/files"))
        .and(header("Authorization", format!("Bearer {}", API_KEY).as_str()))
        .and(body_string_contains("name=\"purpose\""))
        .and(body_string_contains("filename=\"goog-10k.pdf\""))
        .respond_with(success_response(file_body("file-goog", "goog-10k.pdf")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let file = client
        .files()
        .upload(FileUploadRequest::new(
            b"%PDF-1.4".to_vec(),
            "goog-10k.pdf",
            FilePurpose::Assistants,
        ))
        .await
        .unwrap();

    assert_eq!(file.id, "file-goog");
    assert_eq!(file.filename, "goog-10k.pdf");
}

#[tokio::test]
async fn test_download_writes_content_to_disk() {
    let server = MockServer::start().await;
    authed("GET", "/files/file-chart/content")
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/png")
                .set_body_bytes(b"\x89PNG\r\n\x1a\nchart".to_vec()),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let destination = dir.path().join("out").join("chart.png");
    let client = client_for(&server);

    let written = client
        .files()
        .download_to("file-chart", &destination)
        .await
        .unwrap();

    assert_eq!(written, 13);
    assert_eq!(std::fs::read(&destination).unwrap(), b"\x89PNG\r\n\x1a\nchart");
}

#[tokio::test]
async fn test_missing_file_content_is_not_found() {
    let server = MockServer::start().await;
    authed("GET", "/files/file-gone/content")
        .respond_with(error_response(
            404,
            "No such File object: file-gone",
            "invalid_request_error",
        ))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = client.files().content("file-gone").await.unwrap_err();

    assert!(error.is_not_found());
}

#[tokio::test]
async fn test_vector_store_file_batch_polls_until_indexed() {
    let server = MockServer::start().await;
    authed("POST", "/vector_stores")
        .respond_with(success_response(json!({
            "id": "vs_abc123",
            "object": "vector_store",
            "created_at": 1699061776,
            "name": "Financial Statements",
            "status": "completed",
            "file_counts": {"in_progress": 0, "completed": 0, "failed": 0, "cancelled": 0, "total": 0}
        })))
        .mount(&server)
        .await;
    authed("POST", "/vector_stores/vs_abc123/file_batches")
        .and(body_string_contains("file-goog"))
        .respond_with(success_response(batch_body("in_progress")))
        .expect(1)
        .mount(&server)
        .await;
    authed("GET", "/vector_stores/vs_abc123/file_batches/vsfb_abc123")
        .respond_with(success_response(batch_body("in_progress")))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    authed("GET", "/vector_stores/vs_abc123/file_batches/vsfb_abc123")
        .respond_with(success_response(batch_body("completed")))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let store = client
        .vector_stores()
        .create(CreateVectorStoreRequest::new("Financial Statements"))
        .await
        .unwrap();
    let outcome = client
        .vector_stores()
        .create_file_batch_and_poll(
            &store.id,
            vec!["file-goog".to_string(), "file-brka".to_string()],
            &client.config().poll,
        )
        .await
        .unwrap();

    let batch = outcome.into_settled().unwrap();
    assert_eq!(batch.status, FileBatchStatus::Completed);
    assert_eq!(batch.file_counts.completed, 2);
}
