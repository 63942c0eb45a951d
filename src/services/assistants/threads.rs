use crate::auth::AuthManager;
use crate::errors::OpenAIResult;
use crate::resilience::ResilienceOrchestrator;
use crate::services::assistants::{CreateMessageRequest, ToolResources};
use crate::services::ServiceContext;
use crate::transport::HttpTransport;
use crate::types::{DeletionStatus, Metadata};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thread {
    pub id: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub tool_resources: Option<ToolResources>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateThreadRequest {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<CreateMessageRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_resources: Option<ToolResources>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl CreateThreadRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(mut self, message: CreateMessageRequest) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_tool_resources(mut self, resources: ToolResources) -> Self {
        self.tool_resources = Some(resources);
        self
    }
}

#[async_trait]
pub trait ThreadService: Send + Sync {
    /// Creates an empty thread.
    async fn create(&self) -> OpenAIResult<Thread>;
    /// Creates a thread seeded with messages and tool resources.
    async fn create_with(&self, request: CreateThreadRequest) -> OpenAIResult<Thread>;
    async fn retrieve(&self, thread_id: &str) -> OpenAIResult<Thread>;
    async fn delete(&self, thread_id: &str) -> OpenAIResult<DeletionStatus>;
}

pub struct ThreadServiceImpl {
    ctx: ServiceContext,
}

impl ThreadServiceImpl {
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
impl ThreadService for ThreadServiceImpl {
    async fn create(&self) -> OpenAIResult<Thread> {
        self.create_with(CreateThreadRequest::new()).await
    }

    async fn create_with(&self, request: CreateThreadRequest) -> OpenAIResult<Thread> {
        let thread: Thread = self.ctx.post("threads.create", "/threads", &request).await?;
        tracing::info!(thread_id = %thread.id, messages = request.messages.len(), "thread created");
        Ok(thread)
    }

    async fn retrieve(&self, thread_id: &str) -> OpenAIResult<Thread> {
        let path = format!("/threads/{}", thread_id);
        self.ctx.get("threads.retrieve", &path).await
    }

    async fn delete(&self, thread_id: &str) -> OpenAIResult<DeletionStatus> {
        let path = format!("/threads/{}", thread_id);
        self.ctx.delete("threads.delete", &path).await
    }
}
