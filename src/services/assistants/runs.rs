use crate::auth::AuthManager;
use crate::errors::OpenAIResult;
use crate::resilience::ResilienceOrchestrator;
use crate::services::assistants::AssistantTool;
use crate::services::ServiceContext;
use crate::streaming::{decode_stream, StreamEvent};
use crate::transport::{BoxStream, HttpTransport};
use crate::types::{ListResponse, Metadata, PaginationParams, Usage};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub id: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub created_at: i64,
    pub thread_id: String,
    #[serde(default)]
    pub assistant_id: String,
    pub status: RunStatus,
    #[serde(default)]
    pub required_action: Option<RequiredAction>,
    #[serde(default)]
    pub last_error: Option<LastError>,
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub started_at: Option<i64>,
    #[serde(default)]
    pub cancelled_at: Option<i64>,
    #[serde(default)]
    pub failed_at: Option<i64>,
    #[serde(default)]
    pub completed_at: Option<i64>,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub tools: Vec<AssistantTool>,
    #[serde(default)]
    pub usage: Option<Usage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Run {
    /// Tool calls the run is waiting on, if it stopped for them.
    pub fn pending_tool_calls(&self) -> &[ToolCall] {
        match &self.required_action {
            Some(RequiredAction::SubmitToolOutputs { submit_tool_outputs }) => {
                &submit_tool_outputs.tool_calls
            }
            None => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Cancelling,
    Cancelled,
    Failed,
    Completed,
    Incomplete,
    Expired,
}

impl RunStatus {
    /// Statuses a caller can act on: terminal ones plus `requires_action`.
    pub fn is_settled(&self) -> bool {
        !self.is_pending()
    }

    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            RunStatus::Queued | RunStatus::InProgress | RunStatus::Cancelling
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunStatus::Completed
                | RunStatus::Failed
                | RunStatus::Expired
                | RunStatus::Cancelled
                | RunStatus::Incomplete
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Queued => "queued",
            RunStatus::InProgress => "in_progress",
            RunStatus::RequiresAction => "requires_action",
            RunStatus::Cancelling => "cancelling",
            RunStatus::Cancelled => "cancelled",
            RunStatus::Failed => "failed",
            RunStatus::Completed => "completed",
            RunStatus::Incomplete => "incomplete",
            RunStatus::Expired => "expired",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastError {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequiredAction {
    SubmitToolOutputs {
        submit_tool_outputs: SubmitToolOutputs,
    },
}

impl RequiredAction {
    pub fn tool_calls(&self) -> &[ToolCall] {
        match self {
            RequiredAction::SubmitToolOutputs { submit_tool_outputs } => {
                &submit_tool_outputs.tool_calls
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmitToolOutputs {
    pub tool_calls: Vec<ToolCall>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type", default = "function_type")]
    pub kind: String,
    pub function: FunctionCall,
}

fn function_type() -> String {
    "function".to_string()
}

/// `arguments` is the JSON-encoded argument object, as sent by the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub arguments: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolOutput {
    pub tool_call_id: String,
    pub output: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateRunRequest {
    pub assistant_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<AssistantTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl CreateRunRequest {
    pub fn new(assistant_id: impl Into<String>) -> Self {
        Self {
            assistant_id: assistant_id.into(),
            model: None,
            instructions: None,
            additional_instructions: None,
            tools: None,
            metadata: None,
        }
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    pub fn with_additional_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.additional_instructions = Some(instructions.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

#[derive(Debug, Clone, Serialize)]
struct SubmitToolOutputsRequest<'a> {
    tool_outputs: &'a [ToolOutput],
}

#[async_trait]
pub trait RunService: Send + Sync {
    async fn create(&self, thread_id: &str, request: CreateRunRequest) -> OpenAIResult<Run>;
    async fn retrieve(&self, thread_id: &str, run_id: &str) -> OpenAIResult<Run>;
    async fn cancel(&self, thread_id: &str, run_id: &str) -> OpenAIResult<Run>;
    async fn list(
        &self,
        thread_id: &str,
        params: PaginationParams,
    ) -> OpenAIResult<ListResponse<Run>>;
    /// Submits every output of one required action in a single call.
    async fn submit_tool_outputs(
        &self,
        thread_id: &str,
        run_id: &str,
        outputs: Vec<ToolOutput>,
    ) -> OpenAIResult<Run>;
    async fn create_stream(
        &self,
        thread_id: &str,
        request: CreateRunRequest,
    ) -> OpenAIResult<BoxStream<StreamEvent>>;
    async fn submit_tool_outputs_stream(
        &self,
        thread_id: &str,
        run_id: &str,
        outputs: Vec<ToolOutput>,
    ) -> OpenAIResult<BoxStream<StreamEvent>>;
}

pub struct RunServiceImpl {
    ctx: ServiceContext,
}

impl RunServiceImpl {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        auth_manager: Arc<dyn AuthManager>,
        resilience: Arc<dyn ResilienceOrchestrator>,
    ) -> Self {
        Self {
            ctx: ServiceContext::new(transport, auth_manager, resilience),
        }
    }
}

#[async_trait]
impl RunService for RunServiceImpl {
    async fn create(&self, thread_id: &str, request: CreateRunRequest) -> OpenAIResult<Run> {
        let path = format!("/threads/{}/runs", thread_id);
        let run: Run = self.ctx.post("runs.create", &path, &request).await?;
        tracing::info!(thread_id, run_id = %run.id, status = %run.status, "run created");
        Ok(run)
    }

    async fn retrieve(&self, thread_id: &str, run_id: &str) -> OpenAIResult<Run> {
        let path = format!("/threads/{}/runs/{}", thread_id, run_id);
        self.ctx.get("runs.retrieve", &path).await
    }

    async fn cancel(&self, thread_id: &str, run_id: &str) -> OpenAIResult<Run> {
        let path = format!("/threads/{}/runs/{}/cancel", thread_id, run_id);
        self.ctx.post_empty("runs.cancel", &path).await
    }

    async fn list(
        &self,
        thread_id: &str,
        params: PaginationParams,
    ) -> OpenAIResult<ListResponse<Run>> {
        let path = params.apply_to(&format!("/threads/{}/runs", thread_id));
        self.ctx.get("runs.list", &path).await
    }

    async fn submit_tool_outputs(
        &self,
        thread_id: &str,
        run_id: &str,
        outputs: Vec<ToolOutput>,
    ) -> OpenAIResult<Run> {
        let path = format!(
            "/threads/{}/runs/{}/submit_tool_outputs",
            thread_id, run_id
        );
        tracing::debug!(run_id, outputs = outputs.len(), "submitting tool outputs");
        self.ctx
            .post(
                "runs.submit_tool_outputs",
                &path,
                &SubmitToolOutputsRequest {
                    tool_outputs: &outputs,
                },
            )
            .await
    }

    async fn create_stream(
        &self,
        thread_id: &str,
        request: CreateRunRequest,
    ) -> OpenAIResult<BoxStream<StreamEvent>> {
        let path = format!("/threads/{}/runs", thread_id);
        let raw = self.ctx.stream(&path, &request).await?;
        Ok(decode_stream(raw))
    }

    async fn submit_tool_outputs_stream(
        &self,
        thread_id: &str,
        run_id: &str,
        outputs: Vec<ToolOutput>,
    ) -> OpenAIResult<BoxStream<StreamEvent>> {
        let path = format!(
            "/threads/{}/runs/{}/submit_tool_outputs",
            thread_id, run_id
        );
        let raw = self
            .ctx
            .stream(
                &path,
                &SubmitToolOutputsRequest {
                    tool_outputs: &outputs,
                },
            )
            .await?;
        Ok(decode_stream(raw))
    }
}
