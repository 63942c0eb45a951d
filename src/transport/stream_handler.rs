use crate::errors::{ErrorMapper, OpenAIError, OpenAIResult};
use crate::transport::{BoxStream, ResponseParser};
use bytes::Bytes;
use futures::Stream;
use pin_project_lite::pin_project;
use reqwest::Response;
use serde::de::DeserializeOwned;
use std::pin::Pin;
use std::task::{Context, Poll};

pub struct StreamHandler;

impl StreamHandler {
    pub async fn handle_stream(response: Response) -> OpenAIResult<BoxStream<SseEvent>> {
        let status = response.status();
        if !status.is_success() {
            let headers = response.headers().clone();
            let body = response.bytes().await.unwrap_or_default();
            return Err(ErrorMapper::from_response(status.as_u16(), &headers, &body));
        }

        Ok(Box::pin(SseStream::new(response.bytes_stream())))
    }
}

pin_project! {
    /// Splits a byte stream into server-sent events.
    ///
    /// A single network chunk may carry several events, or only part of one.
    pub struct SseStream<S> {
        #[pin]
        inner: S,
        buffer: Vec<u8>,
        finished: bool,
    }
}

impl<S> SseStream<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            buffer: Vec::new(),
            finished: false,
        }
    }
}

fn take_event(buffer: &mut Vec<u8>) -> Option<Vec<u8>> {
    let pos = buffer.windows(2).position(|w| w == b"\n\n")?;
    Some(buffer.drain(..pos + 2).collect())
}

impl<S, E> Stream for SseStream<S>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: Into<OpenAIError>,
{
    type Item = OpenAIResult<SseEvent>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if let Some(raw) = take_event(this.buffer) {
                let event = SseEvent::from_bytes(&raw);
                if event.is_empty() {
                    continue;
                }
                return Poll::Ready(Some(Ok(event)));
            }

            if *this.finished {
                if this.buffer.iter().all(|b| b.is_ascii_whitespace()) {
                    this.buffer.clear();
                    return Poll::Ready(None);
                }
                let raw: Vec<u8> = this.buffer.drain(..).collect();
                return Poll::Ready(Some(Ok(SseEvent::from_bytes(&raw))));
            }

            match this.inner.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(chunk))) => {
                    this.buffer
                        .extend(chunk.iter().copied().filter(|b| *b != b'\r'));
                }
                Poll::Ready(Some(Err(e))) => return Poll::Ready(Some(Err(e.into()))),
                Poll::Ready(None) => *this.finished = true,
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SseEvent {
    pub event_type: Option<String>,
    pub data: String,
    pub id: Option<String>,
}

impl SseEvent {
    pub fn new(event_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            event_type: Some(event_type.into()),
            data: data.into(),
            id: None,
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        let text = String::from_utf8_lossy(bytes);
        let mut event_type = None;
        let mut data_lines = Vec::new();
        let mut id = None;

        for line in text.lines() {
            if line.is_empty() || line.starts_with(':') {
                continue;
            }

            if let Some(stripped) = line.strip_prefix("event:") {
                event_type = Some(stripped.trim().to_string());
            } else if let Some(stripped) = line.strip_prefix("data:") {
                data_lines.push(stripped.strip_prefix(' ').unwrap_or(stripped));
            } else if let Some(stripped) = line.strip_prefix("id:") {
                id = Some(stripped.trim().to_string());
            }
        }

        Self {
            event_type,
            data: data_lines.join("\n"),
            id,
        }
    }

    /// Comment-only or keep-alive frames.
    pub fn is_empty(&self) -> bool {
        self.event_type.is_none() && self.data.is_empty() && self.id.is_none()
    }

    /// The provider ends run streams with `event: done` / `data: [DONE]`.
    pub fn is_done(&self) -> bool {
        self.event_type.as_deref() == Some("done") || self.data.trim() == "[DONE]"
    }

    pub fn parse<T: DeserializeOwned>(&self) -> OpenAIResult<T> {
        if self.is_done() {
            return Err(OpenAIError::Stream("Stream completed".to_string()));
        }

        ResponseParser::parse_json(self.data.as_bytes())
    }
}
