mod categories;
mod error;
mod mapping;

pub use categories::{
    AuthenticationError, ConfigurationError, NetworkError, RateLimitError, RunError, ServerError,
    ToolError, ValidationError,
};
pub use error::{OpenAIError, OpenAIResult};
pub use mapping::{ErrorMapper, OpenAIErrorDetail, OpenAIErrorResponse};
