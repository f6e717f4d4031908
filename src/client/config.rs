//! Client configuration

use crate::error::{OpenAIError, Result};

/// Default API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/";

/// Connection settings for [`Client`](super::Client)
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key sent as a bearer token
    pub api_key: String,
    /// Base URL, trailing slash expected
    pub base_url: String,
    /// Organization header, for keys belonging to multiple organizations
    pub organization: Option<String>,
    /// Request timeout in seconds
    pub timeout: u64,
    /// Retries for retryable failures (429, 5xx, transport)
    pub max_retries: u32,
}

impl ClientConfig {
    /// Configuration with default settings for the given key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            organization: None,
            timeout: 30,
            max_retries: 3,
        }
    }

    /// Configuration from `OPENAI_API_KEY` and `OPENAI_ORGANIZATION`
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            OpenAIError::Config(
                "No API key configured. Please set the OPENAI_API_KEY environment variable."
                    .to_string(),
            )
        })?;

        let mut config = Self::new(api_key);
        config.organization = std::env::var("OPENAI_ORGANIZATION").ok();
        Ok(config)
    }

    /// Builder for incremental configuration
    pub fn builder(api_key: impl Into<String>) -> ConfigBuilder {
        ConfigBuilder {
            config: Self::new(api_key),
        }
    }
}

/// Builder of [`ClientConfig`] instances
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: ClientConfig,
}

impl ConfigBuilder {
    /// Base URL; a trailing slash is appended when missing
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.config.base_url = base_url;
        self
    }

    /// Organization header
    pub fn organization(mut self, organization: impl Into<String>) -> Self {
        self.config.organization = Some(organization.into());
        self
    }

    /// Request timeout in seconds
    pub fn timeout(mut self, timeout: u64) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Retries for retryable failures
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Finalize the configuration
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
