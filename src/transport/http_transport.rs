use crate::client::OpenAIConfig;
use crate::errors::{NetworkError, OpenAIError, OpenAIResult};
use crate::transport::{
    BoxStream, HttpTransport, MultipartBuilder, ResponseParser, SseEvent, StreamHandler,
};
use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, Method};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// HTTP transport implementation using reqwest
pub struct ReqwestTransport {
    client: Client,
    base_url: Url,
    request_timeout: Duration,
    default_headers: HeaderMap,
}

impl ReqwestTransport {
    /// Creates a new ReqwestTransport from configuration.
    ///
    /// The client only carries the connect timeout; the request timeout is
    /// applied per call so event streams are not cut off mid-run.
    pub fn new(config: &OpenAIConfig) -> OpenAIResult<Self> {
        let mut client_builder = Client::builder()
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.max_connections)
            .user_agent(&config.user_agent);

        if let Some(proxy_url) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy_url.as_str()).map_err(|e| {
                OpenAIError::Network(NetworkError::ConnectionFailed(format!(
                    "Invalid proxy {}: {}",
                    proxy_url, e
                )))
            })?;
            client_builder = client_builder.proxy(proxy);
        }

        let client = client_builder.build().map_err(|e| {
            OpenAIError::Network(NetworkError::ConnectionFailed(format!(
                "Failed to build HTTP client: {}",
                e
            )))
        })?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            request_timeout: config.timeout,
            default_headers: HeaderMap::new(),
        })
    }

    /// Creates a new ReqwestTransport with base URL and timeout
    pub fn with_base_url(base_url: &str, timeout: Duration) -> OpenAIResult<Self> {
        let url = Url::parse(base_url)?;

        let client = Client::builder().build().map_err(|e| {
            OpenAIError::Network(NetworkError::ConnectionFailed(format!(
                "Failed to build HTTP client: {}",
                e
            )))
        })?;

        Ok(Self {
            client,
            base_url: url,
            request_timeout: timeout,
            default_headers: HeaderMap::new(),
        })
    }

    /// Sets default headers to include in all requests
    pub fn with_default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = headers;
        self
    }

    /// Builds a full URL from a path
    fn build_url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// Merges default headers with request-specific headers
    fn merge_headers(&self, request_headers: Option<HeaderMap>) -> HeaderMap {
        let mut headers = self.default_headers.clone();
        if let Some(req_headers) = request_headers {
            for (key, value) in req_headers.iter() {
                headers.insert(key.clone(), value.clone());
            }
        }
        headers
    }

    fn prepare(
        &self,
        method: &Method,
        path: &str,
        body: Option<serde_json::Value>,
        headers: Option<HeaderMap>,
    ) -> OpenAIResult<reqwest::RequestBuilder> {
        let url = self.build_url(path);

        let mut request = match *method {
            Method::GET => self.client.get(&url),
            Method::POST => self.client.post(&url),
            Method::DELETE => self.client.delete(&url),
            _ => {
                return Err(OpenAIError::Network(NetworkError::RequestFailed(format!(
                    "Unsupported HTTP method: {}",
                    method
                ))))
            }
        };

        for (key, value) in self.merge_headers(headers).iter() {
            request = request.header(key, value);
        }

        if let Some(body) = body {
            request = request.json(&body);
        }

        Ok(request)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        headers: Option<HeaderMap>,
    ) -> OpenAIResult<Bytes> {
        tracing::debug!(method = %method, path, "sending request");
        let response = self
            .prepare(&method, path, body, headers)?
            .timeout(self.request_timeout)
            .send()
            .await?;
        ResponseParser::parse_response(response).await
    }

    async fn request_stream(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        headers: Option<HeaderMap>,
    ) -> OpenAIResult<BoxStream<SseEvent>> {
        tracing::debug!(method = %method, path, "opening event stream");
        let response = self
            .prepare(&method, path, body, headers)?
            .header(http::header::ACCEPT, "text/event-stream")
            .send()
            .await?;
        StreamHandler::handle_stream(response).await
    }

    async fn upload_file(
        &self,
        path: &str,
        file_data: Bytes,
        file_name: &str,
        purpose: &str,
        headers: Option<HeaderMap>,
    ) -> OpenAIResult<Bytes> {
        let url = self.build_url(path);
        let merged_headers = self.merge_headers(headers);

        let multipart = MultipartBuilder::new()
            .add_file("file", file_name, file_data)
            .add_text("purpose", purpose)
            .build()?;

        let mut request = self
            .client
            .post(&url)
            .multipart(multipart)
            .timeout(self.request_timeout);

        for (key, value) in merged_headers.iter() {
            request = request.header(key, value);
        }

        let response = request.send().await?;
        ResponseParser::parse_response(response).await
    }

    async fn download_file(&self, path: &str, headers: Option<HeaderMap>) -> OpenAIResult<Bytes> {
        let response = self
            .prepare(&Method::GET, path, None, headers)?
            .timeout(self.request_timeout)
            .send()
            .await?;
        ResponseParser::parse_response(response).await
    }
}
