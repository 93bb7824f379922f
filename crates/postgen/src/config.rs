//! Process-wide settings with sensible defaults.
//!
//! [`AppConfig`] is read once at startup. The API token is taken from the
//! environment as-is: a missing or invalid token is not checked here, it
//! surfaces later as a [`PostError::Generation`] from the remote call.

use crate::error::PostError;
use crate::{DEFAULT_MODEL, DEFAULT_TEMPERATURE, HF_ROUTER_URL, InferenceClient, TOKEN_ENV};

/// Settings shared by every generation in the process.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Model identifier. Default: [`DEFAULT_MODEL`].
    pub model: String,
    /// Chat completions URL. Default: [`HF_ROUTER_URL`].
    pub endpoint: String,
    /// Bearer token, usually from `HF_TOKEN`.
    pub api_token: Option<String>,
    /// Sampling temperature. Default: `0.7`.
    pub temperature: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            endpoint: HF_ROUTER_URL.to_string(),
            api_token: None,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl AppConfig {
    /// Defaults plus the token from [`TOKEN_ENV`], if set.
    pub fn from_env() -> Self {
        Self {
            api_token: std::env::var(TOKEN_ENV).ok().filter(|t| !t.is_empty()),
            ..Default::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Build the HTTP client for these settings.
    pub fn build_client(&self) -> Result<InferenceClient, PostError> {
        InferenceClient::with_endpoint(self.api_token.clone(), &self.endpoint, &self.model)
    }
}
