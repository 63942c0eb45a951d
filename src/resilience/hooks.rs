use crate::errors::OpenAIError;
use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RequestContext {
    pub operation: String,
    pub attempt: u32,
}

#[derive(Debug, Clone)]
pub struct ResponseContext {
    pub operation: String,
    pub duration: Duration,
    pub attempt: u32,
}

#[async_trait]
pub trait ResilienceHooks: Send + Sync {
    async fn on_request(&self, _ctx: &RequestContext) {}
    async fn on_response(&self, _ctx: &ResponseContext) {}
    async fn on_error(&self, _ctx: &RequestContext, _error: &OpenAIError) {}
    async fn on_retry(&self, _ctx: &RequestContext, _delay: Duration) {}
}

pub struct NoOpHooks;

#[async_trait]
impl ResilienceHooks for NoOpHooks {}

/// Emits `tracing` events for every attempt.
pub struct LoggingHooks {
    pub log_requests: bool,
    pub log_responses: bool,
    pub log_errors: bool,
}

impl Default for LoggingHooks {
    fn default() -> Self {
        Self {
            log_requests: true,
            log_responses: true,
            log_errors: true,
        }
    }
}

#[async_trait]
impl ResilienceHooks for LoggingHooks {
    async fn on_request(&self, ctx: &RequestContext) {
        if self.log_requests {
            tracing::trace!(operation = %ctx.operation, attempt = ctx.attempt, "starting request");
        }
    }

    async fn on_response(&self, ctx: &ResponseContext) {
        if self.log_responses {
            tracing::debug!(
                operation = %ctx.operation,
                attempt = ctx.attempt,
                duration_ms = ctx.duration.as_millis() as u64,
                "request completed"
            );
        }
    }

    async fn on_error(&self, ctx: &RequestContext, error: &OpenAIError) {
        if self.log_errors {
            tracing::warn!(
                operation = %ctx.operation,
                attempt = ctx.attempt,
                retryable = error.is_retryable(),
                error = %error,
                "request failed"
            );
        }
    }

    async fn on_retry(&self, ctx: &RequestContext, delay: Duration) {
        tracing::info!(
            operation = %ctx.operation,
            attempt = ctx.attempt,
            delay_ms = delay.as_millis() as u64,
            "retrying request"
        );
    }
}
