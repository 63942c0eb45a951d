use crate::errors::{ConfigurationError, OpenAIError, OpenAIResult};
use std::net::SocketAddr;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Assistant to run; one is created for the server's lifetime when unset.
    pub assistant_id: Option<String>,
    pub model: String,
    pub assistant_name: String,
    pub instructions: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            assistant_id: None,
            model: "gpt-4o".to_string(),
            assistant_name: "Math Tutor".to_string(),
            instructions: "You are a personal math tutor. Write and run code to answer math questions."
                .to_string(),
        }
    }
}

impl ServerConfig {
    /// Reads `SERVER_ADDR`, `ASSISTANT_ID` and `ASSISTANT_MODEL`.
    pub fn from_env() -> OpenAIResult<Self> {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("SERVER_ADDR") {
            config.bind_addr = addr.parse().map_err(|e| {
                OpenAIError::Configuration(ConfigurationError::InvalidServerAddress(format!(
                    "Invalid SERVER_ADDR '{}': {}",
                    addr, e
                )))
            })?;
        }

        if let Ok(id) = std::env::var("ASSISTANT_ID") {
            if !id.is_empty() {
                config.assistant_id = Some(id);
            }
        }

        if let Ok(model) = std::env::var("ASSISTANT_MODEL") {
            config.model = model;
        }

        Ok(config)
    }

    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    pub fn with_assistant_id(mut self, id: impl Into<String>) -> Self {
        self.assistant_id = Some(id.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}
