//! Mock authentication manager for testing

use crate::auth::AuthManager;
use crate::errors::{AuthenticationError, OpenAIError, OpenAIResult};
use async_trait::async_trait;
use http::{HeaderMap, HeaderValue};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct MockAuthManager {
    calls: Arc<AtomicUsize>,
    fail: bool,
}

impl MockAuthManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `apply_auth` call fails with an invalid key error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthManager for MockAuthManager {
    async fn apply_auth(&self, headers: &mut HeaderMap) -> OpenAIResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(OpenAIError::Authentication(AuthenticationError::InvalidApiKey(
                "mock rejected credentials".to_string(),
            )));
        }
        headers.insert("Authorization", HeaderValue::from_static("Bearer sk-mock"));
        Ok(())
    }

    fn validate(&self) -> OpenAIResult<()> {
        Ok(())
    }
}
