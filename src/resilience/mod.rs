mod backoff;
mod hooks;
mod orchestrator;

pub use backoff::Backoff;
pub use hooks::{LoggingHooks, NoOpHooks, RequestContext, ResilienceHooks, ResponseContext};
pub use orchestrator::{
    DefaultResilienceOrchestrator, Operation, ResilienceConfig, ResilienceOrchestrator,
};
