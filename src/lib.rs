//! Runtime for the OpenAI Assistants API.
//!
//! On top of typed services for assistants, threads, messages, runs, vector
//! stores and files, the crate provides:
//! - [`runs`]: polling a run until it settles within a time budget, and a
//!   driver answering function calls along the way
//! - [`streaming`]: folding a run's event stream into visible text
//! - [`tools`]: dispatching required actions to registered functions
//! - [`envfile`]: caching created resource ids in a `.env` style file
//! - [`server`]: an axum front end relaying chats to one assistant

pub mod auth;
pub mod cleanup;
pub mod client;
pub mod envfile;
pub mod errors;
pub mod observability;
pub mod replies;
pub mod resilience;
pub mod runs;
pub mod server;
pub mod services;
pub mod streaming;
pub mod tools;
pub mod transport;
pub mod types;

#[cfg(test)]
pub mod fixtures;
#[cfg(test)]
pub mod mocks;

pub use client::{OpenAIClient, OpenAIClientBuilder, OpenAIClientImpl};
pub use errors::{OpenAIError, OpenAIResult};
pub use types::{OpenAIConfig, PollConfig};

pub use services::assistants::{
    Assistant, AssistantService, AssistantTool, CreateAssistantRequest, CreateMessageRequest,
    CreateRunRequest, CreateThreadRequest, Message, MessageService, RequiredAction, Run,
    RunService, RunStatus, Thread, ThreadService, ToolOutput, VectorStore, VectorStoreService,
};
pub use services::files::{FileObject, FilePurpose, FileService, FileUploadRequest};

pub mod prelude {
    pub use crate::cleanup::Cleanup;
    pub use crate::client::{OpenAIClient, OpenAIClientBuilder};
    pub use crate::envfile::EnvFile;
    pub use crate::errors::{OpenAIError, OpenAIResult};
    pub use crate::runs::{PollOutcome, RunDriver, RunPoller};
    pub use crate::services::assistants::{
        AssistantTool, CreateAssistantRequest, CreateMessageRequest, CreateRunRequest,
        FunctionDefinition, RunStatus,
    };
    pub use crate::streaming::{StreamAggregator, StreamEvent};
    pub use crate::tools::ToolRegistry;
    pub use crate::types::{OpenAIConfig, PaginationParams, PollConfig};
}
