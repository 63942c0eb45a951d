use crate::auth::AuthProvider;
use crate::errors::{AuthenticationError, ConfigurationError, OpenAIError, OpenAIResult};
use async_trait::async_trait;
use http::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

const MIN_KEY_LEN: usize = 10;

/// API key provider for OpenAI authentication
pub struct ApiKeyProvider {
    api_key: SecretString,
    organization_id: Option<String>,
    project_id: Option<String>,
}

impl ApiKeyProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_secret(SecretString::new(api_key.into()))
    }

    pub fn from_secret(api_key: SecretString) -> Self {
        Self {
            api_key,
            organization_id: None,
            project_id: None,
        }
    }

    pub fn with_organization(mut self, org_id: impl Into<String>) -> Self {
        self.organization_id = Some(org_id.into());
        self
    }

    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Validates the API key format
    pub fn validate(&self) -> OpenAIResult<()> {
        let key = self.api_key.expose_secret();

        if key.trim().is_empty() {
            return Err(OpenAIError::Configuration(
                ConfigurationError::MissingApiKey("API key is empty".to_string()),
            ));
        }

        if key.len() < MIN_KEY_LEN {
            return Err(OpenAIError::Configuration(
                ConfigurationError::InvalidApiKeyFormat(format!(
                    "API key is too short (minimum {} characters)",
                    MIN_KEY_LEN
                )),
            ));
        }

        Ok(())
    }

    fn header_value(value: &str, error: AuthenticationError) -> OpenAIResult<HeaderValue> {
        let mut header = HeaderValue::from_str(value).map_err(|_| error)?;
        header.set_sensitive(true);
        Ok(header)
    }
}

#[async_trait]
impl AuthProvider for ApiKeyProvider {
    async fn authenticate(&self, headers: &mut HeaderMap) -> OpenAIResult<()> {
        self.validate().map_err(|e| {
            OpenAIError::Authentication(AuthenticationError::InvalidApiKey(e.to_string()))
        })?;

        let bearer = format!("Bearer {}", self.api_key.expose_secret());
        headers.insert(
            http::header::AUTHORIZATION,
            Self::header_value(
                &bearer,
                AuthenticationError::InvalidApiKey(
                    "Failed to create Authorization header".to_string(),
                ),
            )?,
        );

        if let Some(org_id) = &self.organization_id {
            headers.insert(
                "OpenAI-Organization",
                Self::header_value(
                    org_id,
                    AuthenticationError::InvalidOrganizationId(org_id.clone()),
                )?,
            );
        }

        if let Some(project_id) = &self.project_id {
            headers.insert(
                "OpenAI-Project",
                Self::header_value(
                    project_id,
                    AuthenticationError::InvalidProjectId(project_id.clone()),
                )?,
            );
        }

        Ok(())
    }

    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}
