//! Scripted run service for poller and driver tests

use crate::errors::{OpenAIError, OpenAIResult, ValidationError};
use crate::fixtures::run_with_status;
use crate::services::assistants::{CreateRunRequest, Run, RunService, RunStatus, ToolOutput};
use crate::streaming::StreamEvent;
use crate::transport::BoxStream;
use crate::types::{ListResponse, PaginationParams};
use async_trait::async_trait;
use futures::stream;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::time::Instant;

/// Replays queued `retrieve` results; once the queue is empty it keeps
/// answering with the fallback run, if any.
#[derive(Clone, Default)]
pub struct ScriptedRunService {
    inner: Arc<Mutex<ScriptedInner>>,
}

#[derive(Default)]
struct ScriptedInner {
    retrievals: VecDeque<OpenAIResult<Run>>,
    fallback: Option<Run>,
    streams: VecDeque<Vec<OpenAIResult<StreamEvent>>>,
    retrieve_times: Vec<Instant>,
    created: Vec<CreateRunRequest>,
    submitted: Vec<Vec<ToolOutput>>,
}

impl ScriptedRunService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then_status(self, status: RunStatus) -> Self {
        self.then_run(run_with_status(status))
    }

    pub fn then_run(self, run: Run) -> Self {
        self.inner.lock().unwrap().retrievals.push_back(Ok(run));
        self
    }

    pub fn then_error(self, error: OpenAIError) -> Self {
        self.inner.lock().unwrap().retrievals.push_back(Err(error));
        self
    }

    pub fn forever(self, status: RunStatus) -> Self {
        self.inner.lock().unwrap().fallback = Some(run_with_status(status));
        self
    }

    pub fn then_stream(self, events: Vec<StreamEvent>) -> Self {
        self.inner
            .lock()
            .unwrap()
            .streams
            .push_back(events.into_iter().map(Ok).collect());
        self
    }

    pub fn then_stream_items(self, items: Vec<OpenAIResult<StreamEvent>>) -> Self {
        self.inner.lock().unwrap().streams.push_back(items);
        self
    }

    pub fn retrieve_count(&self) -> usize {
        self.inner.lock().unwrap().retrieve_times.len()
    }

    /// Gaps between consecutive `retrieve` calls.
    pub fn retrieve_gaps(&self) -> Vec<std::time::Duration> {
        let inner = self.inner.lock().unwrap();
        inner
            .retrieve_times
            .windows(2)
            .map(|pair| pair[1] - pair[0])
            .collect()
    }

    pub fn submitted(&self) -> Vec<Vec<ToolOutput>> {
        self.inner.lock().unwrap().submitted.clone()
    }

    pub fn created(&self) -> usize {
        self.inner.lock().unwrap().created.len()
    }

    fn next_stream(&self) -> OpenAIResult<BoxStream<StreamEvent>> {
        let items = self
            .inner
            .lock()
            .unwrap()
            .streams
            .pop_front()
            .ok_or_else(|| {
                OpenAIError::Validation(ValidationError::InvalidRequest(
                    "no scripted stream left".to_string(),
                ))
            })?;
        Ok(Box::pin(stream::iter(items)))
    }
}

#[async_trait]
impl RunService for ScriptedRunService {
    async fn create(&self, _thread_id: &str, request: CreateRunRequest) -> OpenAIResult<Run> {
        self.inner.lock().unwrap().created.push(request);
        Ok(run_with_status(RunStatus::Queued))
    }

    async fn retrieve(&self, _thread_id: &str, _run_id: &str) -> OpenAIResult<Run> {
        let mut inner = self.inner.lock().unwrap();
        inner.retrieve_times.push(Instant::now());
        match inner.retrievals.pop_front() {
            Some(result) => result,
            None => inner.fallback.clone().ok_or_else(|| {
                OpenAIError::Validation(ValidationError::InvalidRequest(
                    "no scripted run left".to_string(),
                ))
            }),
        }
    }

    async fn cancel(&self, _thread_id: &str, _run_id: &str) -> OpenAIResult<Run> {
        Ok(run_with_status(RunStatus::Cancelling))
    }

    async fn list(
        &self,
        _thread_id: &str,
        _params: PaginationParams,
    ) -> OpenAIResult<ListResponse<Run>> {
        Ok(ListResponse::new(Vec::new()))
    }

    async fn submit_tool_outputs(
        &self,
        _thread_id: &str,
        _run_id: &str,
        outputs: Vec<ToolOutput>,
    ) -> OpenAIResult<Run> {
        self.inner.lock().unwrap().submitted.push(outputs);
        Ok(run_with_status(RunStatus::Queued))
    }

    async fn create_stream(
        &self,
        _thread_id: &str,
        request: CreateRunRequest,
    ) -> OpenAIResult<BoxStream<StreamEvent>> {
        self.inner.lock().unwrap().created.push(request);
        self.next_stream()
    }

    async fn submit_tool_outputs_stream(
        &self,
        _thread_id: &str,
        _run_id: &str,
        outputs: Vec<ToolOutput>,
    ) -> OpenAIResult<BoxStream<StreamEvent>> {
        self.inner.lock().unwrap().submitted.push(outputs);
        self.next_stream()
    }
}
