use crate::auth::AuthManager;
use crate::errors::OpenAIResult;
use crate::resilience::ResilienceOrchestrator;
use crate::services::assistants::AssistantTool;
use crate::services::ServiceContext;
use crate::transport::HttpTransport;
use crate::types::{ListResponse, Metadata, PaginationParams};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub created_at: i64,
    pub thread_id: String,
    pub role: MessageRole,
    #[serde(default)]
    pub content: Vec<MessageContent>,
    #[serde(default)]
    pub assistant_id: Option<String>,
    #[serde(default)]
    pub run_id: Option<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

impl Message {
    pub fn is_assistant(&self) -> bool {
        self.role == MessageRole::Assistant
    }

    /// Text blocks joined by newlines.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                MessageContent::Text { text } => Some(text.value.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn image_file_ids(&self) -> impl Iterator<Item = &str> {
        self.content.iter().filter_map(|block| match block {
            MessageContent::ImageFile { image_file } => Some(image_file.file_id.as_str()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageContent {
    Text { text: TextContent },
    ImageFile { image_file: ImageFile },
    ImageUrl { image_url: ImageUrl },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TextContent {
    pub value: String,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageFile {
    pub file_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageUrl {
    pub url: String,
}

/// A span of message text that refers to a file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Annotation {
    FileCitation {
        text: String,
        file_citation: FileReference,
        #[serde(default)]
        start_index: Option<u32>,
        #[serde(default)]
        end_index: Option<u32>,
    },
    FilePath {
        text: String,
        file_path: FileReference,
        #[serde(default)]
        start_index: Option<u32>,
        #[serde(default)]
        end_index: Option<u32>,
    },
}

impl Annotation {
    /// The raw span in the message text this annotation replaces.
    pub fn text(&self) -> &str {
        match self {
            Annotation::FileCitation { text, .. } | Annotation::FilePath { text, .. } => text,
        }
    }

    /// Character range of the span in the message text, when the provider
    /// sent one.
    pub fn span(&self) -> Option<(usize, usize)> {
        match self {
            Annotation::FileCitation {
                start_index: Some(start),
                end_index: Some(end),
                ..
            }
            | Annotation::FilePath {
                start_index: Some(start),
                end_index: Some(end),
                ..
            } => Some((*start as usize, *end as usize)),
            _ => None,
        }
    }

    pub fn file_id(&self) -> &str {
        match self {
            Annotation::FileCitation { file_citation, .. } => &file_citation.file_id,
            Annotation::FilePath { file_path, .. } => &file_path.file_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileReference {
    pub file_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Attachment {
    pub file_id: String,
    #[serde(default)]
    pub tools: Vec<AssistantTool>,
}

impl Attachment {
    pub fn new(file_id: impl Into<String>, tools: Vec<AssistantTool>) -> Self {
        Self {
            file_id: file_id.into(),
            tools,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateMessageRequest {
    pub role: MessageRole,
    pub content: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl CreateMessageRequest {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            attachments: Vec::new(),
            metadata: None,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            ..Self::user(content)
        }
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }
}

#[async_trait]
pub trait MessageService: Send + Sync {
    async fn create(
        &self,
        thread_id: &str,
        request: CreateMessageRequest,
    ) -> OpenAIResult<Message>;
    async fn retrieve(&self, thread_id: &str, message_id: &str) -> OpenAIResult<Message>;
    /// Lists messages, newest first unless `params.order` says otherwise.
    async fn list(
        &self,
        thread_id: &str,
        params: PaginationParams,
    ) -> OpenAIResult<ListResponse<Message>>;
}

pub struct MessageServiceImpl {
    ctx: ServiceContext,
}

impl MessageServiceImpl {
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
impl MessageService for MessageServiceImpl {
    async fn create(
        &self,
        thread_id: &str,
        request: CreateMessageRequest,
    ) -> OpenAIResult<Message> {
        let path = format!("/threads/{}/messages", thread_id);
        self.ctx.post("messages.create", &path, &request).await
    }

    async fn retrieve(&self, thread_id: &str, message_id: &str) -> OpenAIResult<Message> {
        let path = format!("/threads/{}/messages/{}", thread_id, message_id);
        self.ctx.get("messages.retrieve", &path).await
    }

    async fn list(
        &self,
        thread_id: &str,
        params: PaginationParams,
    ) -> OpenAIResult<ListResponse<Message>> {
        let path = params.apply_to(&format!("/threads/{}/messages", thread_id));
        self.ctx.get("messages.list", &path).await
    }
}
