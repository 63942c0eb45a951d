use crate::errors::{OpenAIError, OpenAIResult};
use crate::resilience::{Backoff, LoggingHooks, RequestContext, ResilienceHooks, ResponseContext};
use async_trait::async_trait;
use bytes::Bytes;
use futures::future::BoxFuture;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::sleep;

/// A request that can be issued again on a retryable failure.
pub type Operation<'a> = Box<dyn Fn() -> BoxFuture<'a, OpenAIResult<Bytes>> + Send + Sync + 'a>;

#[async_trait]
pub trait ResilienceOrchestrator: Send + Sync {
    async fn execute<'a>(&self, name: &str, operation: Operation<'a>) -> OpenAIResult<Bytes>;
}

#[derive(Debug, Clone)]
pub struct ResilienceConfig {
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub multiplier: f64,
    pub jitter: bool,
}

impl Default for ResilienceConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(1000),
            max_delay: Duration::from_secs(60),
            multiplier: 2.0,
            jitter: true,
        }
    }
}

impl ResilienceConfig {
    pub fn backoff(&self) -> Backoff {
        Backoff {
            initial_delay: self.initial_delay,
            max_delay: self.max_delay,
            multiplier: self.multiplier,
            jitter: self.jitter,
        }
    }
}

pub struct DefaultResilienceOrchestrator {
    config: ResilienceConfig,
    backoff: Backoff,
    hooks: Arc<dyn ResilienceHooks>,
}

impl DefaultResilienceOrchestrator {
    pub fn new(config: ResilienceConfig) -> Self {
        Self {
            backoff: config.backoff(),
            config,
            hooks: Arc::new(LoggingHooks::default()),
        }
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ResilienceHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn passthrough() -> Self {
        Self::new(ResilienceConfig {
            max_retries: 0,
            ..Default::default()
        })
    }

    fn retry_delay(&self, error: &OpenAIError, attempt: u32) -> Duration {
        match error {
            OpenAIError::RateLimit(rate_err) => rate_err
                .retry_after()
                .map(Duration::from_secs)
                .unwrap_or_else(|| self.backoff.delay(attempt)),
            _ => self.backoff.delay(attempt),
        }
    }
}

#[async_trait]
impl ResilienceOrchestrator for DefaultResilienceOrchestrator {
    async fn execute<'a>(&self, name: &str, operation: Operation<'a>) -> OpenAIResult<Bytes> {
        let mut attempt = 0;

        loop {
            let ctx = RequestContext {
                operation: name.to_string(),
                attempt,
            };
            self.hooks.on_request(&ctx).await;
            let started = Instant::now();

            match operation().await {
                Ok(result) => {
                    self.hooks
                        .on_response(&ResponseContext {
                            operation: ctx.operation,
                            duration: started.elapsed(),
                            attempt,
                        })
                        .await;
                    return Ok(result);
                }
                Err(e) => {
                    self.hooks.on_error(&ctx, &e).await;

                    if !e.is_retryable() || attempt >= self.config.max_retries {
                        return Err(e);
                    }

                    let delay = self.retry_delay(&e, attempt);
                    self.hooks.on_retry(&ctx, delay).await;
                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
