use crate::auth::AuthManager;
use crate::errors::{OpenAIError, OpenAIResult};
use crate::resilience::ResilienceOrchestrator;
use crate::transport::{BoxStream, HttpTransport, ResponseParser, SseEvent};
use bytes::Bytes;
use http::{HeaderMap, HeaderValue, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

const BETA_HEADER: &str = "OpenAI-Beta";
const ASSISTANTS_V2: &str = "assistants=v2";

/// Shared plumbing of every service: authentication, the assistants beta
/// header, retries and JSON decoding.
#[derive(Clone)]
pub struct ServiceContext {
    transport: Arc<dyn HttpTransport>,
    auth_manager: Arc<dyn AuthManager>,
    resilience: Arc<dyn ResilienceOrchestrator>,
}

impl ServiceContext {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        auth_manager: Arc<dyn AuthManager>,
        resilience: Arc<dyn ResilienceOrchestrator>,
    ) -> Self {
        Self {
            transport,
            auth_manager,
            resilience,
        }
    }

    async fn headers(&self) -> OpenAIResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        self.auth_manager.apply_auth(&mut headers).await?;
        headers.insert(BETA_HEADER, HeaderValue::from_static(ASSISTANTS_V2));
        Ok(headers)
    }

    /// Sends a request through the resilience layer and decodes the reply.
    pub async fn send<R: DeserializeOwned>(
        &self,
        operation: &str,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> OpenAIResult<R> {
        let headers = self.headers().await?;
        let transport = &self.transport;

        let bytes = self
            .resilience
            .execute(
                operation,
                Box::new(move || {
                    transport.request(method.clone(), path, body.clone(), Some(headers.clone()))
                }),
            )
            .await?;

        ResponseParser::parse_json(&bytes)
    }

    pub async fn get<R: DeserializeOwned>(&self, operation: &str, path: &str) -> OpenAIResult<R> {
        self.send(operation, Method::GET, path, None).await
    }

    pub async fn post<B, R>(&self, operation: &str, path: &str, body: &B) -> OpenAIResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = to_json(body)?;
        self.send(operation, Method::POST, path, Some(body)).await
    }

    pub async fn post_empty<R: DeserializeOwned>(
        &self,
        operation: &str,
        path: &str,
    ) -> OpenAIResult<R> {
        self.send(operation, Method::POST, path, None).await
    }

    pub async fn delete<R: DeserializeOwned>(
        &self,
        operation: &str,
        path: &str,
    ) -> OpenAIResult<R> {
        self.send(operation, Method::DELETE, path, None).await
    }

    /// Opens an event stream. Streams are not retried once established.
    pub async fn stream<B>(&self, path: &str, body: &B) -> OpenAIResult<BoxStream<SseEvent>>
    where
        B: Serialize + ?Sized,
    {
        let mut body = to_json(body)?;
        if let serde_json::Value::Object(map) = &mut body {
            map.insert("stream".to_string(), serde_json::Value::Bool(true));
        }
        let headers = self.headers().await?;
        self.transport
            .request_stream(Method::POST, path, Some(body), Some(headers))
            .await
    }

    pub async fn upload<R: DeserializeOwned>(
        &self,
        path: &str,
        data: Bytes,
        file_name: &str,
        purpose: &str,
    ) -> OpenAIResult<R> {
        let headers = self.headers().await?;
        let bytes = self
            .transport
            .upload_file(path, data, file_name, purpose, Some(headers))
            .await?;
        ResponseParser::parse_json(&bytes)
    }

    pub async fn download(&self, operation: &str, path: &str) -> OpenAIResult<Bytes> {
        let headers = self.headers().await?;
        let transport = &self.transport;

        self.resilience
            .execute(
                operation,
                Box::new(move || transport.download_file(path, Some(headers.clone()))),
            )
            .await
    }
}

fn to_json<B: Serialize + ?Sized>(body: &B) -> OpenAIResult<serde_json::Value> {
    serde_json::to_value(body)
        .map_err(|e| OpenAIError::Serialization(format!("Failed to serialize request: {}", e)))
}
