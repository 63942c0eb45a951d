mod client_impl;
mod config;
mod factory;

pub use client_impl::OpenAIClientImpl;
pub use config::{OpenAIConfig, PollConfig, DEFAULT_BASE_URL};
pub use factory::OpenAIClientBuilder;

use crate::errors::OpenAIResult;
use crate::runs::{RunDriver, RunPoller};
use crate::services::assistants::{
    AssistantService, MessageService, RunService, ThreadService, VectorStoreService,
};
use crate::services::files::FileService;
use crate::tools::ToolRegistry;
use async_trait::async_trait;

#[async_trait]
pub trait OpenAIClient: Send + Sync {
    fn assistants(&self) -> &dyn AssistantService;
    fn threads(&self) -> &dyn ThreadService;
    fn messages(&self) -> &dyn MessageService;
    fn runs(&self) -> &dyn RunService;
    fn vector_stores(&self) -> &dyn VectorStoreService;
    fn files(&self) -> &dyn FileService;
    fn config(&self) -> &OpenAIConfig;

    /// A poller over this client's runs using the configured budget.
    fn run_poller(&self) -> RunPoller<'_> {
        RunPoller::new(self.runs(), self.config().poll.clone())
    }

    /// A driver that answers `requires_action` with `tools`.
    fn run_driver<'a>(&'a self, tools: &'a ToolRegistry) -> RunDriver<'a> {
        RunDriver::new(self.runs(), tools, self.config().poll.clone())
    }

    async fn health_check(&self) -> OpenAIResult<bool>;
}
