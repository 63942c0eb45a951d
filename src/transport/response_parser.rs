use crate::errors::{ErrorMapper, OpenAIError, OpenAIResult};
use bytes::Bytes;
use reqwest::Response;
use serde::de::DeserializeOwned;

pub struct ResponseParser;

impl ResponseParser {
    /// Returns the body of a successful response, or the mapped provider error.
    pub async fn parse_response(response: Response) -> OpenAIResult<Bytes> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.bytes().await?);
        }

        let headers = response.headers().clone();
        let body = response.bytes().await.unwrap_or_default();
        let error = ErrorMapper::from_response(status.as_u16(), &headers, &body);
        tracing::debug!(status = status.as_u16(), error = %error, "request rejected");
        Err(error)
    }

    pub fn parse_json<T: DeserializeOwned>(data: &[u8]) -> OpenAIResult<T> {
        serde_json::from_slice(data).map_err(|e| {
            OpenAIError::Deserialization(format!(
                "Failed to deserialize JSON: {}. Data: {}",
                e,
                String::from_utf8_lossy(data)
            ))
        })
    }
}
