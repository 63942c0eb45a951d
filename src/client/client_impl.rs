use crate::auth::AuthManager;
use crate::client::{OpenAIClient, OpenAIConfig};
use crate::errors::OpenAIResult;
use crate::resilience::ResilienceOrchestrator;
use crate::services::assistants::{
    AssistantService, AssistantServiceImpl, MessageService, MessageServiceImpl, RunService,
    RunServiceImpl, ThreadService, ThreadServiceImpl, VectorStoreService, VectorStoreServiceImpl,
};
use crate::services::files::{FileService, FileServiceImpl};
use crate::transport::HttpTransport;
use crate::types::PaginationParams;
use async_trait::async_trait;
use std::sync::Arc;

pub struct OpenAIClientImpl {
    config: OpenAIConfig,

    assistants_service: AssistantServiceImpl,
    threads_service: ThreadServiceImpl,
    messages_service: MessageServiceImpl,
    runs_service: RunServiceImpl,
    vector_stores_service: VectorStoreServiceImpl,
    files_service: FileServiceImpl,
}

impl OpenAIClientImpl {
    pub fn new(
        config: OpenAIConfig,
        transport: Arc<dyn HttpTransport>,
        auth_manager: Arc<dyn AuthManager>,
        resilience: Arc<dyn ResilienceOrchestrator>,
    ) -> Self {
        let assistants_service = AssistantServiceImpl::new(
            transport.clone(),
            auth_manager.clone(),
            resilience.clone(),
        );

        let threads_service = ThreadServiceImpl::new(
            transport.clone(),
            auth_manager.clone(),
            resilience.clone(),
        );

        let messages_service = MessageServiceImpl::new(
            transport.clone(),
            auth_manager.clone(),
            resilience.clone(),
        );

        let runs_service = RunServiceImpl::new(
            transport.clone(),
            auth_manager.clone(),
            resilience.clone(),
        );

        let vector_stores_service = VectorStoreServiceImpl::new(
            transport.clone(),
            auth_manager.clone(),
            resilience.clone(),
        );

        let files_service = FileServiceImpl::new(transport, auth_manager, resilience);

        Self {
            config,
            assistants_service,
            threads_service,
            messages_service,
            runs_service,
            vector_stores_service,
            files_service,
        }
    }
}

#[async_trait]
impl OpenAIClient for OpenAIClientImpl {
    fn assistants(&self) -> &dyn AssistantService {
        &self.assistants_service
    }

    fn threads(&self) -> &dyn ThreadService {
        &self.threads_service
    }

    fn messages(&self) -> &dyn MessageService {
        &self.messages_service
    }

    fn runs(&self) -> &dyn RunService {
        &self.runs_service
    }

    fn vector_stores(&self) -> &dyn VectorStoreService {
        &self.vector_stores_service
    }

    fn files(&self) -> &dyn FileService {
        &self.files_service
    }

    fn config(&self) -> &OpenAIConfig {
        &self.config
    }

    async fn health_check(&self) -> OpenAIResult<bool> {
        self.assistants_service
            .list(PaginationParams::new().with_limit(1))
            .await
            .map(|_| true)
    }
}
