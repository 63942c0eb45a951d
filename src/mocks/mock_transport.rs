//! Mock HTTP transport for testing

use crate::errors::{OpenAIError, OpenAIResult, ValidationError};
use crate::transport::{BoxStream, HttpTransport, SseEvent};
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;
use http::{HeaderMap, Method};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Records every request and replays queued responses in order.
#[derive(Clone, Default)]
pub struct MockHttpTransport {
    inner: Arc<Mutex<MockHttpTransportInner>>,
}

#[derive(Default)]
struct MockHttpTransportInner {
    responses: VecDeque<OpenAIResult<serde_json::Value>>,
    stream_responses: VecDeque<OpenAIResult<Vec<OpenAIResult<SseEvent>>>>,
    file_upload_responses: VecDeque<OpenAIResult<serde_json::Value>>,
    file_download_responses: VecDeque<OpenAIResult<Bytes>>,
    requests: Vec<MockRequest>,
}

#[derive(Debug, Clone)]
pub struct MockRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
    pub headers: HeaderMap,
}

fn not_configured(kind: &str) -> OpenAIError {
    OpenAIError::Validation(ValidationError::InvalidRequest(format!(
        "no mock {kind} response queued"
    )))
}

impl MockHttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json_response(self, response: serde_json::Value) -> Self {
        self.inner.lock().unwrap().responses.push_back(Ok(response));
        self
    }

    pub fn with_error_response(self, error: OpenAIError) -> Self {
        self.inner.lock().unwrap().responses.push_back(Err(error));
        self
    }

    pub fn with_sse_response(self, events: Vec<SseEvent>) -> Self {
        self.inner
            .lock()
            .unwrap()
            .stream_responses
            .push_back(Ok(events.into_iter().map(Ok).collect()));
        self
    }

    /// A stream that delivers `events` and then fails mid-flight.
    pub fn with_broken_sse_response(self, events: Vec<SseEvent>, error: OpenAIError) -> Self {
        let mut items: Vec<OpenAIResult<SseEvent>> = events.into_iter().map(Ok).collect();
        items.push(Err(error));
        self.inner
            .lock()
            .unwrap()
            .stream_responses
            .push_back(Ok(items));
        self
    }

    /// The stream request itself is rejected.
    pub fn with_stream_error(self, error: OpenAIError) -> Self {
        self.inner
            .lock()
            .unwrap()
            .stream_responses
            .push_back(Err(error));
        self
    }

    pub fn with_file_upload_response(self, response: OpenAIResult<serde_json::Value>) -> Self {
        self.inner
            .lock()
            .unwrap()
            .file_upload_responses
            .push_back(response);
        self
    }

    pub fn with_file_download_response(self, response: OpenAIResult<Bytes>) -> Self {
        self.inner
            .lock()
            .unwrap()
            .file_download_responses
            .push_back(response);
        self
    }

    pub fn requests(&self) -> Vec<MockRequest> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn verify_request(&self, method: Method, path: &str) -> bool {
        self.inner
            .lock()
            .unwrap()
            .requests
            .iter()
            .any(|r| r.method == method && r.path == path)
    }

    pub fn verify_request_with_body(&self, method: Method, path: &str, body_contains: &str) -> bool {
        self.inner.lock().unwrap().requests.iter().any(|r| {
            r.method == method
                && r.path == path
                && r.body
                    .as_ref()
                    .map(|b| b.to_string().contains(body_contains))
                    .unwrap_or(false)
        })
    }

    pub fn request_count(&self) -> usize {
        self.inner.lock().unwrap().requests.len()
    }

    fn record(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        headers: Option<HeaderMap>,
    ) {
        self.inner.lock().unwrap().requests.push(MockRequest {
            method,
            path: path.to_string(),
            body,
            headers: headers.unwrap_or_default(),
        });
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        headers: Option<HeaderMap>,
    ) -> OpenAIResult<Bytes> {
        self.record(method, path, body, headers);

        let response = self
            .inner
            .lock()
            .unwrap()
            .responses
            .pop_front()
            .ok_or_else(|| not_configured("json"))?;
        response.map(|json| Bytes::from(json.to_string()))
    }

    async fn request_stream(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        headers: Option<HeaderMap>,
    ) -> OpenAIResult<BoxStream<SseEvent>> {
        self.record(method, path, body, headers);

        let items = self
            .inner
            .lock()
            .unwrap()
            .stream_responses
            .pop_front()
            .ok_or_else(|| not_configured("stream"))??;
        Ok(Box::pin(stream::iter(items)))
    }

    async fn upload_file(
        &self,
        path: &str,
        _file_data: Bytes,
        file_name: &str,
        purpose: &str,
        headers: Option<HeaderMap>,
    ) -> OpenAIResult<Bytes> {
        self.record(
            Method::POST,
            path,
            Some(serde_json::json!({"file": file_name, "purpose": purpose})),
            headers,
        );

        let response = self
            .inner
            .lock()
            .unwrap()
            .file_upload_responses
            .pop_front()
            .ok_or_else(|| not_configured("upload"))?;
        response.map(|json| Bytes::from(json.to_string()))
    }

    async fn download_file(&self, path: &str, headers: Option<HeaderMap>) -> OpenAIResult<Bytes> {
        self.record(Method::GET, path, None, headers);

        self.inner
            .lock()
            .unwrap()
            .file_download_responses
            .pop_front()
            .ok_or_else(|| not_configured("download"))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AuthenticationError;
    use futures::StreamExt;

    #[tokio::test]
    async fn test_mock_transport_json_response() {
        let mock = MockHttpTransport::new()
            .with_json_response(serde_json::json!({"id": "asst_123", "object": "assistant"}));

        let bytes = mock
            .request(
                Method::POST,
                "/assistants",
                Some(serde_json::json!({"model": "gpt-4o"})),
                None,
            )
            .await
            .unwrap();

        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["id"], "asst_123");
        assert!(mock.verify_request_with_body(Method::POST, "/assistants", "gpt-4o"));
    }

    #[tokio::test]
    async fn test_mock_transport_error_response() {
        let mock = MockHttpTransport::new().with_error_response(OpenAIError::Authentication(
            AuthenticationError::InvalidApiKey("Invalid API key".to_string()),
        ));

        let result = mock.request(Method::GET, "/threads/t", None, None).await;

        assert!(result.unwrap_err().is_authentication_error());
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_transport_replays_sse() {
        let mock = MockHttpTransport::new()
            .with_sse_response(vec![SseEvent::new("thread.run.created", "{}")]);

        let events: Vec<_> = mock
            .request_stream(Method::POST, "/threads/t/runs", None, None)
            .await
            .unwrap()
            .collect()
            .await;
        assert_eq!(events.len(), 1);
    }
}
