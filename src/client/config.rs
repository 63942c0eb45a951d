use crate::errors::{ConfigurationError, OpenAIError, OpenAIResult, RunError};
use crate::resilience::{Backoff, ResilienceConfig};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIConfig {
    #[serde(skip_serializing)]
    pub api_key: Secret<String>,

    #[serde(default = "default_base_url")]
    pub base_url: Url,

    #[serde(default)]
    pub organization_id: Option<String>,

    #[serde(default)]
    pub project_id: Option<String>,

    /// Per-request timeout for non-streaming calls.
    #[serde(default = "default_timeout")]
    pub timeout: Duration,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: Duration,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_max_connections")]
    pub max_connections: usize,

    #[serde(default)]
    pub proxy: Option<Url>,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default)]
    pub poll: PollConfig,
}

impl OpenAIConfig {
    /// Creates a new OpenAIConfig with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: default_base_url(),
            organization_id: None,
            project_id: None,
            timeout: default_timeout(),
            connect_timeout: default_connect_timeout(),
            max_retries: default_max_retries(),
            max_connections: default_max_connections(),
            proxy: None,
            user_agent: default_user_agent(),
            poll: PollConfig::default(),
        }
    }

    /// Creates a new OpenAIConfig from environment variables
    ///
    /// Reads the following environment variables:
    /// - OPENAI_API_KEY (required)
    /// - OPENAI_BASE_URL (optional, defaults to https://api.openai.com/v1)
    /// - OPENAI_ORGANIZATION_ID (optional)
    /// - OPENAI_PROJECT_ID (optional)
    /// - OPENAI_TIMEOUT_SECS (optional)
    /// - OPENAI_POLL_BUDGET_SECS (optional, run polling budget)
    pub fn from_env() -> OpenAIResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            OpenAIError::Configuration(ConfigurationError::MissingApiKey(
                "OPENAI_API_KEY environment variable not found".to_string(),
            ))
        })?;

        let mut config = Self::new(api_key);

        if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
            let url = Url::parse(&base_url).map_err(|e| {
                OpenAIError::Configuration(ConfigurationError::InvalidBaseUrl(format!(
                    "Invalid OPENAI_BASE_URL: {}",
                    e
                )))
            })?;
            config.base_url = url;
        }

        if let Ok(org_id) = std::env::var("OPENAI_ORGANIZATION_ID") {
            config.organization_id = Some(org_id);
        }

        if let Ok(project_id) = std::env::var("OPENAI_PROJECT_ID") {
            config.project_id = Some(project_id);
        }

        if let Some(timeout) = env_secs("OPENAI_TIMEOUT_SECS")? {
            config.timeout = timeout;
        }

        if let Some(budget) = env_secs("OPENAI_POLL_BUDGET_SECS")? {
            config.poll.max_elapsed = budget;
        }

        Ok(config)
    }

    /// Loads `.env` (if present) into the process environment, then reads it.
    pub fn from_dotenv() -> OpenAIResult<Self> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
            Err(e) if e.not_found() => {}
            Err(e) => {
                return Err(OpenAIError::LocalState(format!(
                    "Failed to load .env: {}",
                    e
                )))
            }
        }
        Self::from_env()
    }

    /// Validates the configuration
    pub fn validate(&self) -> OpenAIResult<()> {
        let api_key = self.api_key.expose_secret();

        if api_key.is_empty() {
            return Err(OpenAIError::Configuration(ConfigurationError::MissingApiKey(
                "API key is empty".to_string(),
            )));
        }

        if api_key.len() < 10 {
            return Err(OpenAIError::Configuration(
                ConfigurationError::InvalidApiKeyFormat("API key is too short".to_string()),
            ));
        }

        if self.timeout.is_zero() || self.connect_timeout.is_zero() {
            return Err(OpenAIError::Configuration(ConfigurationError::InvalidTimeout(
                "Timeouts must be greater than 0".to_string(),
            )));
        }

        self.poll.validate()
    }

    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_organization_id(mut self, org_id: impl Into<String>) -> Self {
        self.organization_id = Some(org_id.into());
        self
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_proxy(mut self, proxy: Url) -> Self {
        self.proxy = Some(proxy);
        self
    }

    pub fn with_poll_config(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }

    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    pub fn resilience_config(&self) -> ResilienceConfig {
        ResilienceConfig {
            max_retries: self.max_retries,
            ..Default::default()
        }
    }
}

/// Backoff and wall-clock budget for waiting on a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub multiplier: f64,
    pub jitter: bool,
    /// Total time allowed before giving up. Must be non-zero.
    pub max_elapsed: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(16),
            multiplier: 2.0,
            jitter: false,
            max_elapsed: Duration::from_secs(30),
        }
    }
}

impl PollConfig {
    pub fn with_max_elapsed(mut self, max_elapsed: Duration) -> Self {
        self.max_elapsed = max_elapsed;
        self
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn validate(&self) -> OpenAIResult<()> {
        if self.max_elapsed.is_zero() {
            return Err(RunError::InvalidBudget(
                "polling budget must be greater than 0".to_string(),
            )
            .into());
        }

        if self.initial_delay.is_zero() {
            return Err(ConfigurationError::InvalidPollConfig(
                "initial delay must be greater than 0".to_string(),
            )
            .into());
        }

        if !self.multiplier.is_finite() || self.multiplier < 1.0 {
            return Err(ConfigurationError::InvalidPollConfig(format!(
                "multiplier must be at least 1.0, got {}",
                self.multiplier
            ))
            .into());
        }

        if self.max_delay < self.initial_delay {
            return Err(ConfigurationError::InvalidPollConfig(
                "max delay must not be below the initial delay".to_string(),
            )
            .into());
        }

        Ok(())
    }

    pub fn backoff(&self) -> Backoff {
        Backoff {
            initial_delay: self.initial_delay,
            max_delay: self.max_delay,
            multiplier: self.multiplier,
            jitter: self.jitter,
        }
    }
}

fn env_secs(name: &str) -> OpenAIResult<Option<Duration>> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(|secs| Some(Duration::from_secs(secs)))
            .map_err(|e| {
                OpenAIError::Configuration(ConfigurationError::InvalidTimeout(format!(
                    "{}={:?}: {}",
                    name, raw, e
                )))
            }),
        Err(_) => Ok(None),
    }
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid")
}

fn default_timeout() -> Duration {
    Duration::from_secs(60)
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_max_retries() -> u32 {
    3
}

fn default_max_connections() -> usize {
    100
}

fn default_user_agent() -> String {
    format!("integrations-openai-assistants/{}", env!("CARGO_PKG_VERSION"))
}
