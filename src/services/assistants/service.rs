use crate::auth::AuthManager;
use crate::errors::OpenAIResult;
use crate::resilience::ResilienceOrchestrator;
use crate::services::assistants::{Assistant, CreateAssistantRequest, ModifyAssistantRequest};
use crate::services::ServiceContext;
use crate::transport::HttpTransport;
use crate::types::{DeletionStatus, ListResponse, PaginationParams};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait AssistantService: Send + Sync {
    async fn create(&self, request: CreateAssistantRequest) -> OpenAIResult<Assistant>;
    async fn retrieve(&self, assistant_id: &str) -> OpenAIResult<Assistant>;
    async fn modify(
        &self,
        assistant_id: &str,
        request: ModifyAssistantRequest,
    ) -> OpenAIResult<Assistant>;
    async fn delete(&self, assistant_id: &str) -> OpenAIResult<DeletionStatus>;
    async fn list(&self, params: PaginationParams) -> OpenAIResult<ListResponse<Assistant>>;
}

pub struct AssistantServiceImpl {
    ctx: ServiceContext,
}

impl AssistantServiceImpl {
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
impl AssistantService for AssistantServiceImpl {
    async fn create(&self, request: CreateAssistantRequest) -> OpenAIResult<Assistant> {
        let assistant: Assistant = self
            .ctx
            .post("assistants.create", "/assistants", &request)
            .await?;
        tracing::info!(assistant_id = %assistant.id, "assistant created");
        Ok(assistant)
    }

    async fn retrieve(&self, assistant_id: &str) -> OpenAIResult<Assistant> {
        let path = format!("/assistants/{}", assistant_id);
        self.ctx.get("assistants.retrieve", &path).await
    }

    async fn modify(
        &self,
        assistant_id: &str,
        request: ModifyAssistantRequest,
    ) -> OpenAIResult<Assistant> {
        let path = format!("/assistants/{}", assistant_id);
        self.ctx.post("assistants.modify", &path, &request).await
    }

    async fn delete(&self, assistant_id: &str) -> OpenAIResult<DeletionStatus> {
        let path = format!("/assistants/{}", assistant_id);
        self.ctx.delete("assistants.delete", &path).await
    }

    async fn list(&self, params: PaginationParams) -> OpenAIResult<ListResponse<Assistant>> {
        let path = params.apply_to("/assistants");
        self.ctx.get("assistants.list", &path).await
    }
}
