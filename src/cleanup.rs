//! Best-effort deletion of remote resources a session created.

use crate::client::OpenAIClient;
use crate::errors::OpenAIResult;
use crate::types::{DeletionStatus, ListResponse, PaginationParams};
use std::fmt;

const PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Assistant(String),
    Thread(String),
    File(String),
    VectorStore(String),
}

impl Resource {
    pub fn id(&self) -> &str {
        match self {
            Resource::Assistant(id)
            | Resource::Thread(id)
            | Resource::File(id)
            | Resource::VectorStore(id) => id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Resource::Assistant(_) => "assistant",
            Resource::Thread(_) => "thread",
            Resource::File(_) => "file",
            Resource::VectorStore(_) => "vector_store",
        }
    }

    async fn delete(&self, client: &dyn OpenAIClient) -> OpenAIResult<DeletionStatus> {
        match self {
            Resource::Assistant(id) => client.assistants().delete(id).await,
            Resource::Thread(id) => client.threads().delete(id).await,
            Resource::File(id) => client.files().delete(id).await,
            Resource::VectorStore(id) => client.vector_stores().delete(id).await,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.id())
    }
}

#[derive(Debug, Default)]
pub struct CleanupReport {
    pub deleted: Vec<Resource>,
    /// Resources that could not be deleted, with the failure message.
    pub failed: Vec<(Resource, String)>,
}

impl CleanupReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Resources queued for deletion, removed in the order they were added.
///
/// Failures are logged and recorded; they never stop the remaining deletions
/// and are not retried.
#[derive(Debug, Default, Clone)]
pub struct Cleanup {
    resources: Vec<Resource>,
}

impl Cleanup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assistant(mut self, id: impl Into<String>) -> Self {
        self.resources.push(Resource::Assistant(id.into()));
        self
    }

    pub fn thread(mut self, id: impl Into<String>) -> Self {
        self.resources.push(Resource::Thread(id.into()));
        self
    }

    pub fn file(mut self, id: impl Into<String>) -> Self {
        self.resources.push(Resource::File(id.into()));
        self
    }

    pub fn vector_store(mut self, id: impl Into<String>) -> Self {
        self.resources.push(Resource::VectorStore(id.into()));
        self
    }

    pub fn push(&mut self, resource: Resource) {
        self.resources.push(resource);
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub async fn run(self, client: &dyn OpenAIClient) -> CleanupReport {
        let mut report = CleanupReport::default();

        for resource in self.resources {
            match resource.delete(client).await {
                Ok(_) => {
                    tracing::info!(kind = resource.kind(), id = resource.id(), "deleted");
                    report.deleted.push(resource);
                }
                Err(e) => {
                    tracing::warn!(
                        kind = resource.kind(),
                        id = resource.id(),
                        error = %e,
                        "cleanup failed"
                    );
                    report.failed.push((resource, e.to_string()));
                }
            }
        }

        report
    }
}

/// Deletes every assistant visible to the API key.
pub async fn delete_all_assistants(client: &dyn OpenAIClient) -> OpenAIResult<CleanupReport> {
    let mut cleanup = Cleanup::new();
    let mut params = PaginationParams::new().with_limit(PAGE_SIZE);
    loop {
        let page = client.assistants().list(params.clone()).await?;
        for assistant in &page.data {
            cleanup.push(Resource::Assistant(assistant.id.clone()));
        }
        match next_page(&page, params) {
            Some(next) => params = next,
            None => break,
        }
    }
    Ok(cleanup.run(client).await)
}

/// Deletes every vector store visible to the API key.
pub async fn delete_all_vector_stores(client: &dyn OpenAIClient) -> OpenAIResult<CleanupReport> {
    let mut cleanup = Cleanup::new();
    let mut params = PaginationParams::new().with_limit(PAGE_SIZE);
    loop {
        let page = client.vector_stores().list(params.clone()).await?;
        for store in &page.data {
            cleanup.push(Resource::VectorStore(store.id.clone()));
        }
        match next_page(&page, params) {
            Some(next) => params = next,
            None => break,
        }
    }
    Ok(cleanup.run(client).await)
}

/// Deletes every uploaded file.
pub async fn delete_all_files(client: &dyn OpenAIClient) -> OpenAIResult<CleanupReport> {
    let files = client.files().list(None).await?;
    let cleanup = files
        .data
        .into_iter()
        .fold(Cleanup::new(), |cleanup, file| cleanup.file(file.id));
    Ok(cleanup.run(client).await)
}

fn next_page<T>(page: &ListResponse<T>, params: PaginationParams) -> Option<PaginationParams> {
    if !page.has_more {
        return None;
    }
    page.last_id.as_ref().map(|last| params.with_after(last.clone()))
}
