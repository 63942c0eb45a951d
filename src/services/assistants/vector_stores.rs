use crate::auth::AuthManager;
use crate::client::PollConfig;
use crate::errors::OpenAIResult;
use crate::resilience::ResilienceOrchestrator;
use crate::runs::{poll_until, PollOutcome, Pollable};
use crate::services::ServiceContext;
use crate::transport::HttpTransport;
use crate::types::{DeletionStatus, ListResponse, Metadata, PaginationParams};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VectorStore {
    pub id: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub usage_bytes: u64,
    #[serde(default)]
    pub file_counts: FileCounts,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileCounts {
    #[serde(default)]
    pub in_progress: u32,
    #[serde(default)]
    pub completed: u32,
    #[serde(default)]
    pub failed: u32,
    #[serde(default)]
    pub cancelled: u32,
    #[serde(default)]
    pub total: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateVectorStoreRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub file_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl CreateVectorStoreRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_file_ids(mut self, file_ids: Vec<String>) -> Self {
        self.file_ids = file_ids;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileBatchStatus {
    InProgress,
    Completed,
    Cancelled,
    Failed,
}

impl FileBatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileBatchStatus::InProgress => "in_progress",
            FileBatchStatus::Completed => "completed",
            FileBatchStatus::Cancelled => "cancelled",
            FileBatchStatus::Failed => "failed",
        }
    }
}

/// A group of files being indexed into a vector store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VectorStoreFileBatch {
    pub id: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub created_at: i64,
    pub vector_store_id: String,
    pub status: FileBatchStatus,
    #[serde(default)]
    pub file_counts: FileCounts,
}

impl Pollable for VectorStoreFileBatch {
    fn id(&self) -> &str {
        &self.id
    }

    fn status_label(&self) -> String {
        self.status.as_str().to_string()
    }

    fn is_settled(&self) -> bool {
        self.status != FileBatchStatus::InProgress
    }
}

#[derive(Serialize)]
struct CreateFileBatchRequest<'a> {
    file_ids: &'a [String],
}

#[async_trait]
pub trait VectorStoreService: Send + Sync {
    async fn create(&self, request: CreateVectorStoreRequest) -> OpenAIResult<VectorStore>;
    async fn retrieve(&self, vector_store_id: &str) -> OpenAIResult<VectorStore>;
    async fn delete(&self, vector_store_id: &str) -> OpenAIResult<DeletionStatus>;
    async fn list(&self, params: PaginationParams) -> OpenAIResult<ListResponse<VectorStore>>;

    async fn create_file_batch(
        &self,
        vector_store_id: &str,
        file_ids: Vec<String>,
    ) -> OpenAIResult<VectorStoreFileBatch>;

    async fn retrieve_file_batch(
        &self,
        vector_store_id: &str,
        batch_id: &str,
    ) -> OpenAIResult<VectorStoreFileBatch>;

    /// Adds files to the store and polls the batch until indexing settles.
    async fn create_file_batch_and_poll(
        &self,
        vector_store_id: &str,
        file_ids: Vec<String>,
        config: &PollConfig,
    ) -> OpenAIResult<PollOutcome<VectorStoreFileBatch>> {
        let batch = self.create_file_batch(vector_store_id, file_ids).await?;
        if batch.is_settled() {
            return Ok(PollOutcome::Settled(batch));
        }

        let batch_id = batch.id;
        poll_until(config, || self.retrieve_file_batch(vector_store_id, &batch_id)).await
    }
}

pub struct VectorStoreServiceImpl {
    ctx: ServiceContext,
}

impl VectorStoreServiceImpl {
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
impl VectorStoreService for VectorStoreServiceImpl {
    async fn create(&self, request: CreateVectorStoreRequest) -> OpenAIResult<VectorStore> {
        let store: VectorStore = self
            .ctx
            .post("vector_stores.create", "/vector_stores", &request)
            .await?;
        tracing::info!(vector_store_id = %store.id, "vector store created");
        Ok(store)
    }

    async fn retrieve(&self, vector_store_id: &str) -> OpenAIResult<VectorStore> {
        let path = format!("/vector_stores/{}", vector_store_id);
        self.ctx.get("vector_stores.retrieve", &path).await
    }

    async fn delete(&self, vector_store_id: &str) -> OpenAIResult<DeletionStatus> {
        let path = format!("/vector_stores/{}", vector_store_id);
        self.ctx.delete("vector_stores.delete", &path).await
    }

    async fn list(&self, params: PaginationParams) -> OpenAIResult<ListResponse<VectorStore>> {
        let path = params.apply_to("/vector_stores");
        self.ctx.get("vector_stores.list", &path).await
    }

    async fn create_file_batch(
        &self,
        vector_store_id: &str,
        file_ids: Vec<String>,
    ) -> OpenAIResult<VectorStoreFileBatch> {
        let path = format!("/vector_stores/{}/file_batches", vector_store_id);
        let batch: VectorStoreFileBatch = self
            .ctx
            .post(
                "vector_stores.file_batches.create",
                &path,
                &CreateFileBatchRequest {
                    file_ids: &file_ids,
                },
            )
            .await?;
        tracing::debug!(
            vector_store_id,
            batch_id = %batch.id,
            files = file_ids.len(),
            "file batch created"
        );
        Ok(batch)
    }

    async fn retrieve_file_batch(
        &self,
        vector_store_id: &str,
        batch_id: &str,
    ) -> OpenAIResult<VectorStoreFileBatch> {
        let path = format!("/vector_stores/{}/file_batches/{}", vector_store_id, batch_id);
        self.ctx
            .get("vector_stores.file_batches.retrieve", &path)
            .await
    }
}
