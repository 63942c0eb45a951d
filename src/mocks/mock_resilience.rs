//! Mock resilience orchestrator for testing

use crate::errors::{OpenAIError, OpenAIResult, ServerError};
use crate::resilience::{Operation, ResilienceOrchestrator};
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::{Arc, Mutex};

/// Runs each operation exactly once and counts executions.
#[derive(Clone, Default)]
pub struct MockResilienceOrchestrator {
    inner: Arc<Mutex<MockResilienceOrchestratorInner>>,
}

#[derive(Default)]
struct MockResilienceOrchestratorInner {
    operations: Vec<String>,
    should_fail_after: Option<usize>,
}

impl MockResilienceOrchestrator {
    pub fn passthrough() -> Self {
        Self::default()
    }

    /// Fails every execution after the first `count`.
    pub fn with_failure_after(self, count: usize) -> Self {
        self.inner.lock().unwrap().should_fail_after = Some(count);
        self
    }

    pub fn execution_count(&self) -> usize {
        self.inner.lock().unwrap().operations.len()
    }

    /// Names of the executed operations, in order.
    pub fn operations(&self) -> Vec<String> {
        self.inner.lock().unwrap().operations.clone()
    }
}

#[async_trait]
impl ResilienceOrchestrator for MockResilienceOrchestrator {
    async fn execute<'a>(&self, name: &str, operation: Operation<'a>) -> OpenAIResult<Bytes> {
        let should_fail = {
            let mut inner = self.inner.lock().unwrap();
            inner.operations.push(name.to_string());
            let count = inner.operations.len();
            inner.should_fail_after.map(|n| count > n).unwrap_or(false)
        };

        if should_fail {
            return Err(OpenAIError::Server(ServerError::InternalError(
                "Mock resilience failure".to_string(),
            )));
        }

        operation().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;

    #[tokio::test]
    async fn test_mock_resilience_failure_after() {
        let mock = MockResilienceOrchestrator::passthrough().with_failure_after(2);

        for _ in 0..2 {
            let result = mock
                .execute("test", Box::new(|| async { Ok::<_, OpenAIError>(Bytes::from_static(b"ok")) }.boxed()))
                .await;
            assert!(result.is_ok());
        }

        let result = mock
            .execute("test", Box::new(|| async { Ok::<_, OpenAIError>(Bytes::from_static(b"ok")) }.boxed()))
            .await;
        assert!(result.is_err());
        assert_eq!(mock.execution_count(), 3);
        assert_eq!(mock.operations(), vec!["test", "test", "test"]);
    }
}
