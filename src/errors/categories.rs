use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ConfigurationError {
    #[error("Missing API key: {0}")]
    MissingApiKey(String),

    #[error("Invalid API key format: {0}")]
    InvalidApiKeyFormat(String),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Invalid timeout: {0}")]
    InvalidTimeout(String),

    #[error("Invalid poll configuration: {0}")]
    InvalidPollConfig(String),

    #[error("Invalid server address: {0}")]
    InvalidServerAddress(String),
}

#[derive(Error, Debug, Clone)]
pub enum AuthenticationError {
    #[error("Invalid API key: {0}")]
    InvalidApiKey(String),

    #[error("Expired API key: {0}")]
    ExpiredApiKey(String),

    #[error("Insufficient permissions: {0}")]
    InsufficientPermissions(String),

    #[error("Invalid organization ID: {0}")]
    InvalidOrganizationId(String),

    #[error("Invalid project ID: {0}")]
    InvalidProjectId(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

#[derive(Error, Debug, Clone)]
pub enum ValidationError {
    #[error("Invalid parameter: {parameter} - {reason}")]
    InvalidParameter { parameter: String, reason: String },

    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

#[derive(Error, Debug, Clone)]
pub enum RateLimitError {
    #[error("Rate limit exceeded: {message}")]
    RateLimitExceeded { message: String },

    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("Too many requests: {message}")]
    TooManyRequests {
        message: String,
        retry_after_secs: Option<u64>,
    },
}

impl RateLimitError {
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            RateLimitError::TooManyRequests { retry_after_secs, .. } => *retry_after_secs,
            _ => None,
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Connection timeout: {0}")]
    ConnectionTimeout(String),
}

#[derive(Error, Debug, Clone)]
pub enum ServerError {
    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Bad gateway: {0}")]
    BadGateway(String),

    #[error("Gateway timeout: {0}")]
    GatewayTimeout(String),
}

/// Failures of the run lifecycle that are not remote run states.
///
/// A run that ends `failed` or `expired` is returned as data; these variants
/// cover the cases where the local side gives up.
#[derive(Error, Debug, Clone)]
pub enum RunError {
    #[error("Run {run_id} still {status} after {elapsed_ms}ms of polling")]
    PollBudgetExhausted {
        run_id: String,
        status: String,
        elapsed_ms: u64,
    },

    #[error("Invalid polling budget: {0}")]
    InvalidBudget(String),

    #[error("Run {run_id} requires action but carries no tool calls")]
    MissingRequiredAction { run_id: String },
}

#[derive(Error, Debug, Clone)]
pub enum ToolError {
    #[error("No function registered under '{0}'")]
    UnknownFunction(String),

    #[error("Malformed arguments for '{name}': {reason}")]
    InvalidArguments { name: String, reason: String },

    #[error("Function '{name}' failed: {reason}")]
    ExecutionFailed { name: String, reason: String },
}
