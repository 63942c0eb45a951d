//! HTTP front end relaying chats to a single assistant.
//!
//! Routes:
//! - `POST /chat` posts a user message, creating a thread when none is given
//! - `POST /chat/stream` posts a message and streams the run as plain text
//! - `GET /stream/:thread_id` runs the assistant on a thread and streams SSE
//!   frames of the form `data: {"message": ...}`
//! - `GET /health`
//!
//! Every route answers CORS preflights and allows any origin.

mod config;
mod cors;
mod error;
mod routes;


pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::{router, AppState, ChatRequest, ChatResponse};

use crate::client::OpenAIClient;
use crate::errors::{ConfigurationError, NetworkError, OpenAIError, OpenAIResult};
use crate::services::assistants::{AssistantTool, CreateAssistantRequest};
use std::future::Future;
use std::sync::Arc;

/// Serves until `shutdown` resolves.
///
/// Without a configured assistant id, one is created at startup and deleted
/// again once the server has stopped.
pub async fn serve<F>(
    client: Arc<dyn OpenAIClient>,
    config: ServerConfig,
    shutdown: F,
) -> OpenAIResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (assistant_id, provisioned) = match &config.assistant_id {
        Some(id) => (id.clone(), false),
        None => {
            let request = CreateAssistantRequest::new(config.model.clone())
                .with_name(config.assistant_name.clone())
                .with_instructions(config.instructions.clone())
                .with_tool(AssistantTool::code_interpreter());
            let assistant = client.assistants().create(request).await?;
            (assistant.id, true)
        }
    };

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .map_err(|e| {
            OpenAIError::Configuration(ConfigurationError::InvalidServerAddress(format!(
                "{}: {}",
                config.bind_addr, e
            )))
        })?;
    tracing::info!(addr = %config.bind_addr, assistant_id = %assistant_id, "server listening");

    let state = AppState::new(client.clone(), assistant_id.clone());
    let served = axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| OpenAIError::Network(NetworkError::ConnectionFailed(e.to_string())));

    if provisioned {
        match client.assistants().delete(&assistant_id).await {
            Ok(_) => tracing::info!(assistant_id = %assistant_id, "assistant deleted"),
            Err(e) => tracing::warn!(assistant_id = %assistant_id, error = %e, "assistant cleanup failed"),
        }
    }

    served
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
