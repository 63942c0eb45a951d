use crate::auth::AuthManager;
use crate::errors::OpenAIResult;
use crate::resilience::ResilienceOrchestrator;
use crate::services::files::{FileObject, FilePurpose, FileRequestValidator, FileUploadRequest};
use crate::services::ServiceContext;
use crate::transport::HttpTransport;
use crate::types::{DeletionStatus, ListResponse};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::Path;
use std::sync::Arc;

#[async_trait]
pub trait FileService: Send + Sync {
    async fn list(&self, purpose: Option<FilePurpose>) -> OpenAIResult<ListResponse<FileObject>>;
    async fn upload(&self, request: FileUploadRequest) -> OpenAIResult<FileObject>;
    async fn retrieve(&self, file_id: &str) -> OpenAIResult<FileObject>;
    async fn delete(&self, file_id: &str) -> OpenAIResult<DeletionStatus>;
    async fn content(&self, file_id: &str) -> OpenAIResult<Bytes>;
    /// Writes the file's content to `destination`, creating parent directories.
    async fn download_to(&self, file_id: &str, destination: &Path) -> OpenAIResult<u64>;
}

pub struct FileServiceImpl {
    ctx: ServiceContext,
}

impl FileServiceImpl {
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
impl FileService for FileServiceImpl {
    async fn list(&self, purpose: Option<FilePurpose>) -> OpenAIResult<ListResponse<FileObject>> {
        let path = match purpose {
            Some(p) => format!("/files?purpose={}", p.as_str()),
            None => "/files".to_string(),
        };
        self.ctx.get("files.list", &path).await
    }

    async fn upload(&self, request: FileUploadRequest) -> OpenAIResult<FileObject> {
        FileRequestValidator::validate(&request)?;

        let file: FileObject = self
            .ctx
            .upload(
                "/files",
                request.file_data,
                &request.filename,
                request.purpose.as_str(),
            )
            .await?;
        tracing::info!(file_id = %file.id, filename = %file.filename, "file uploaded");
        Ok(file)
    }

    async fn retrieve(&self, file_id: &str) -> OpenAIResult<FileObject> {
        let path = format!("/files/{}", file_id);
        self.ctx.get("files.retrieve", &path).await
    }

    async fn delete(&self, file_id: &str) -> OpenAIResult<DeletionStatus> {
        let path = format!("/files/{}", file_id);
        self.ctx.delete("files.delete", &path).await
    }

    async fn content(&self, file_id: &str) -> OpenAIResult<Bytes> {
        let path = format!("/files/{}/content", file_id);
        self.ctx.download("files.content", &path).await
    }

    async fn download_to(&self, file_id: &str, destination: &Path) -> OpenAIResult<u64> {
        let data = self.content(file_id).await?;
        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(destination, &data).await?;
        tracing::info!(file_id, path = %destination.display(), bytes = data.len(), "file downloaded");
        Ok(data.len() as u64)
    }
}
