//! Orchestrator configuration
//!
//! `CaptionConfig` is built once (builder or environment) and handed to
//! [`CaptionOrchestrator`](crate::orchestrator::CaptionOrchestrator). API keys
//! are held as [`SecretString`] and only exposed when headers are built.

use std::collections::HashMap;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::error::CaptionError;
use crate::retry::RetryPolicy;
use crate::types::ProviderType;
use crate::utils::http_headers::ProviderHeaders;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection settings for one backend provider
#[derive(Debug)]
pub struct ProviderConfig {
    /// API key; `None` makes every call fail as unauthenticated
    pub api_key: Option<SecretString>,
    /// Base URL without trailing slash
    pub base_url: String,
    /// Bound on a single HTTP exchange
    pub request_timeout: Duration,
    /// Extra headers sent with every request
    pub headers: HashMap<String, String>,
}

impl ProviderConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api_key: None,
            base_url: base_url.into(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            headers: HashMap::new(),
        }
    }

    /// Default settings for a provider (public endpoint, no key)
    pub fn for_provider(provider: ProviderType) -> Self {
        match provider {
            ProviderType::OpenAi => Self::new(DEFAULT_OPENAI_BASE_URL),
            ProviderType::Anthropic => Self::new(DEFAULT_ANTHROPIC_BASE_URL),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(api_key.into()));
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Exposed key without surrounding whitespace, if one is configured and non-empty
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(|key| key.expose_secret().trim())
            .filter(|key| !key.is_empty())
    }

    /// Base URL with any trailing slash removed
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Validate the configuration
    pub fn validate(&self, provider: ProviderType) -> Result<(), CaptionError> {
        if self.base_url.is_empty() {
            return Err(CaptionError::Configuration(format!(
                "{} base URL cannot be empty",
                provider.label()
            )));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(CaptionError::Configuration(format!(
                "{} base URL must start with http:// or https://",
                provider.label()
            )));
        }
        if self.request_timeout.is_zero() {
            return Err(CaptionError::Configuration(format!(
                "{} request timeout must be greater than zero",
                provider.label()
            )));
        }
        // Header values are fixed for the lifetime of a backend, so reject bad ones here
        let key = self.api_key().unwrap_or("unset");
        match provider {
            ProviderType::OpenAi => ProviderHeaders::openai(key, &self.headers),
            ProviderType::Anthropic => ProviderHeaders::anthropic(key, &self.headers),
        }
        .map_err(|e| match e {
            CaptionError::Configuration(message) => {
                CaptionError::Configuration(format!("{}: {message}", provider.label()))
            }
            other => other,
        })?;
        Ok(())
    }
}

/// Full orchestrator configuration
#[derive(Debug)]
pub struct CaptionConfig {
    pub openai: ProviderConfig,
    pub anthropic: ProviderConfig,
    /// Bound applied by the orchestrator around each backend call
    pub call_timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            openai: ProviderConfig::for_provider(ProviderType::OpenAi),
            anthropic: ProviderConfig::for_provider(ProviderType::Anthropic),
            call_timeout: DEFAULT_CALL_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }
}

impl CaptionConfig {
    pub fn builder() -> CaptionConfigBuilder {
        CaptionConfigBuilder::default()
    }

    /// Settings for a given provider
    pub fn provider(&self, provider: ProviderType) -> &ProviderConfig {
        match provider {
            ProviderType::OpenAi => &self.openai,
            ProviderType::Anthropic => &self.anthropic,
        }
    }

    /// Read configuration from the process environment.
    ///
    /// - `OPENAI_API_KEY`, `ANTHROPIC_API_KEY`
    /// - `OPENAI_BASE_URL`, `ANTHROPIC_BASE_URL`
    /// - `CAPTIONIST_CALL_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self, CaptionError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CaptionError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();
        if let Some(key) = lookup("OPENAI_API_KEY") {
            builder = builder.openai_api_key(key);
        }
        if let Some(key) = lookup("ANTHROPIC_API_KEY") {
            builder = builder.anthropic_api_key(key);
        }
        if let Some(url) = lookup("OPENAI_BASE_URL") {
            builder = builder.openai_base_url(url);
        }
        if let Some(url) = lookup("ANTHROPIC_BASE_URL") {
            builder = builder.anthropic_base_url(url);
        }
        if let Some(raw) = lookup("CAPTIONIST_CALL_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                CaptionError::Configuration(format!(
                    "CAPTIONIST_CALL_TIMEOUT_SECS must be a whole number of seconds, got '{raw}'"
                ))
            })?;
            builder = builder.call_timeout(Duration::from_secs(secs));
        }
        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), CaptionError> {
        for provider in ProviderType::ALL {
            self.provider(provider).validate(provider)?;
        }
        if self.call_timeout.is_zero() {
            return Err(CaptionError::Configuration(
                "Call timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for [`CaptionConfig`]
#[derive(Debug, Default)]
pub struct CaptionConfigBuilder {
    config: CaptionConfig,
}

impl CaptionConfigBuilder {
    pub fn openai_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.openai.api_key = Some(SecretString::from(key.into()));
        self
    }

    pub fn anthropic_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.anthropic.api_key = Some(SecretString::from(key.into()));
        self
    }

    pub fn openai_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.openai.base_url = url.into();
        self
    }

    pub fn anthropic_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.anthropic.base_url = url.into();
        self
    }

    /// Replace the whole OpenAI section
    pub fn openai(mut self, config: ProviderConfig) -> Self {
        self.config.openai = config;
        self
    }

    /// Replace the whole Anthropic section
    pub fn anthropic(mut self, config: ProviderConfig) -> Self {
        self.config.anthropic = config;
        self
    }

    /// Per-request HTTP timeout for both providers
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.openai.request_timeout = timeout;
        self.config.anthropic.request_timeout = timeout;
        self
    }

    pub fn call_timeout(mut self, timeout: Duration) -> Self {
        self.config.call_timeout = timeout;
        self
    }

    pub fn retry(mut self, policy: RetryPolicy) -> Self {
        self.config.retry = policy;
        self
    }

    pub fn build(self) -> Result<CaptionConfig, CaptionError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_public_endpoints() {
        let config = CaptionConfig::builder().build().unwrap();
        assert_eq!(config.openai.base_url(), DEFAULT_OPENAI_BASE_URL);
        assert_eq!(config.anthropic.base_url(), DEFAULT_ANTHROPIC_BASE_URL);
        assert_eq!(config.call_timeout, DEFAULT_CALL_TIMEOUT);
        assert!(config.openai.api_key().is_none());
    }

    #[test]
    fn reads_environment() {
        let config = CaptionConfig::from_lookup(env(&[
            ("OPENAI_API_KEY", "sk-1"),
            ("ANTHROPIC_BASE_URL", "http://localhost:9000/"),
            ("CAPTIONIST_CALL_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.openai.api_key(), Some("sk-1"));
        assert!(config.anthropic.api_key().is_none());
        assert_eq!(config.anthropic.base_url(), "http://localhost:9000");
        assert_eq!(config.call_timeout, Duration::from_secs(5));
    }

    #[test]
    fn rejects_bad_values() {
        let err = CaptionConfig::from_lookup(env(&[("CAPTIONIST_CALL_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, CaptionError::Configuration(_)));

        let err = CaptionConfig::builder()
            .openai_base_url("ftp://example.com")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("OpenAI base URL"));

        assert!(
            CaptionConfig::builder()
                .call_timeout(Duration::ZERO)
                .build()
                .is_err()
        );
    }

    #[test]
    fn key_read_from_file_is_trimmed() {
        let config = CaptionConfig::builder()
            .openai_api_key("sk-abc\n")
            .build()
            .unwrap();
        assert_eq!(config.openai.api_key(), Some("sk-abc"));
    }

    #[test]
    fn unusable_header_values_fail_validation() {
        let err = CaptionConfig::builder()
            .anthropic_api_key("sk-a\nbc")
            .build()
            .unwrap_err();
        assert!(matches!(err, CaptionError::Configuration(_)));
        assert!(err.to_string().contains("Anthropic"));

        let provider = ProviderConfig::for_provider(ProviderType::OpenAi)
            .with_api_key("sk-ok")
            .with_header("bad header", "value");
        assert!(provider.validate(ProviderType::OpenAi).is_err());
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let provider = ProviderConfig::for_provider(ProviderType::Anthropic).with_api_key("  ");
        assert!(provider.api_key().is_none());
    }

    #[test]
    fn debug_output_redacts_keys() {
        let provider = ProviderConfig::for_provider(ProviderType::OpenAi).with_api_key("sk-secret");
        assert!(!format!("{provider:?}").contains("sk-secret"));
    }
}
