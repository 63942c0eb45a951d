mod http_transport;
mod multipart;
mod response_parser;
mod stream_handler;

pub use http_transport::ReqwestTransport;
pub use multipart::MultipartBuilder;
pub use response_parser::ResponseParser;
pub use stream_handler::{SseEvent, SseStream, StreamHandler};

use crate::errors::OpenAIResult;
use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use http::{HeaderMap, Method};
use std::pin::Pin;

pub type BoxStream<T> = Pin<Box<dyn Stream<Item = OpenAIResult<T>> + Send>>;

/// Raw HTTP access to the provider.
///
/// Bodies travel as JSON values and responses as bytes so the trait stays
/// object safe; typed decoding happens in the services.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        headers: Option<HeaderMap>,
    ) -> OpenAIResult<Bytes>;

    /// Opens a server-sent event stream. Only the connect timeout applies.
    async fn request_stream(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        headers: Option<HeaderMap>,
    ) -> OpenAIResult<BoxStream<SseEvent>>;

    async fn upload_file(
        &self,
        path: &str,
        file_data: Bytes,
        file_name: &str,
        purpose: &str,
        headers: Option<HeaderMap>,
    ) -> OpenAIResult<Bytes>;

    async fn download_file(&self, path: &str, headers: Option<HeaderMap>) -> OpenAIResult<Bytes>;
}
