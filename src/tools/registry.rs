use crate::errors::{OpenAIResult, ToolError};
use crate::services::assistants::{RequiredAction, ToolOutput};
use futures::future::BoxFuture;
use futures::FutureExt;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// A prepared invocation; nothing runs until it is awaited.
pub type ToolFuture = BoxFuture<'static, Result<String, String>>;

type Handler = Arc<dyn Fn(Value) -> Result<ToolFuture, String> + Send + Sync>;

/// Explicit name → function map.
///
/// Functions receive the decoded argument object and return the output
/// string submitted back to the run, or a failure reason.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    handlers: HashMap<String, Handler>,
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("functions", &self.names())
            .finish()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an async function taking the raw argument object.
    pub fn register<F, Fut>(&mut self, name: impl Into<String>, function: F) -> &mut Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, String>> + Send + 'static,
    {
        let function = Arc::new(function);
        self.handlers.insert(
            name.into(),
            Arc::new(move |args| {
                let function = function.clone();
                Ok(async move { function(args).await }.boxed())
            }),
        );
        self
    }

    /// Registers a synchronous function taking the raw argument object.
    pub fn register_sync<F>(&mut self, name: impl Into<String>, function: F) -> &mut Self
    where
        F: Fn(Value) -> Result<String, String> + Send + Sync + 'static,
    {
        let function = Arc::new(function);
        self.handlers.insert(
            name.into(),
            Arc::new(move |args| {
                let function = function.clone();
                Ok(async move { function(args) }.boxed())
            }),
        );
        self
    }

    /// Registers an async function taking a typed argument struct. Arguments
    /// that do not deserialize are rejected before any function runs.
    pub fn register_typed<A, F, Fut>(&mut self, name: impl Into<String>, function: F) -> &mut Self
    where
        A: DeserializeOwned + Send + 'static,
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, String>> + Send + 'static,
    {
        let function = Arc::new(function);
        self.handlers.insert(
            name.into(),
            Arc::new(move |args| {
                let args: A = serde_json::from_value(args).map_err(|e| e.to_string())?;
                let function = function.clone();
                Ok(async move { function(args).await }.boxed())
            }),
        );
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Resolves every tool call of `action` into one batch of outputs.
    ///
    /// All calls are resolved and their arguments parsed first; a single
    /// unknown name or malformed argument fails the batch before any
    /// function is invoked. Functions then run in call order.
    pub async fn dispatch(&self, action: &RequiredAction) -> OpenAIResult<Vec<ToolOutput>> {
        let calls = action.tool_calls();
        let mut prepared = Vec::with_capacity(calls.len());

        for call in calls {
            let name = call.function.name.as_str();
            let handler = self
                .handlers
                .get(name)
                .ok_or_else(|| ToolError::UnknownFunction(name.to_string()))?;

            let raw = call.function.arguments.trim();
            let args: Value = if raw.is_empty() {
                Value::Object(Default::default())
            } else {
                serde_json::from_str(raw).map_err(|e| ToolError::InvalidArguments {
                    name: name.to_string(),
                    reason: e.to_string(),
                })?
            };

            let invocation = handler(args).map_err(|reason| ToolError::InvalidArguments {
                name: name.to_string(),
                reason,
            })?;
            prepared.push((call.id.as_str(), name, invocation));
        }

        let mut outputs = Vec::with_capacity(prepared.len());
        for (call_id, name, invocation) in prepared {
            tracing::debug!(function = name, call_id, "invoking tool");
            let output = invocation.await.map_err(|reason| ToolError::ExecutionFailed {
                name: name.to_string(),
                reason,
            })?;
            outputs.push(ToolOutput {
                tool_call_id: call_id.to_string(),
                output,
            });
        }

        tracing::info!(outputs = outputs.len(), "tool calls resolved");
        Ok(outputs)
    }
}
