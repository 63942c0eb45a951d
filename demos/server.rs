//! Example: Chat server
//!
//! Serves the chat routes on `SERVER_ADDR` (default `127.0.0.1:8000`). With
//! no `ASSISTANT_ID` set, a math tutor assistant is created for the lifetime
//! of the server.
//!
//! ## Usage
//!
//! ```bash
//! export OPENAI_API_KEY=sk-...
//! cargo run --example server
//! curl -N localhost:8000/chat/stream -H 'content-type: application/json' \
//!      -d '{"message": "Solve 3x + 11 = 14"}'
//! ```

use integrations_openai_assistants::observability::LoggingConfig;
use integrations_openai_assistants::prelude::*;
use integrations_openai_assistants::server::{serve, shutdown_signal, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    LoggingConfig::from_env().init().map_err(|e| e.to_string())?;

    let client = OpenAIClientBuilder::new()
        .with_config(OpenAIConfig::from_dotenv()?)
        .build()?;

    serve(client, ServerConfig::from_env()?, shutdown_signal()).await?;
    Ok(())
}
