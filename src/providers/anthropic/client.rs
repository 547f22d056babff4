//! Anthropic backend

use std::sync::Arc;

use async_trait::async_trait;

use super::transformers::{AnthropicRequestTransformer, AnthropicResponseTransformer};
use crate::config::ProviderConfig;
use crate::error::CaptionError;
use crate::executors::HeadersHook;
use crate::providers::{BackendCore, default_http_client, missing_key_error};
use crate::retry::RetryPolicy;
use crate::traits::CaptionBackend;
use crate::types::{
    Analysis, CaptionRequest, CaptionResult, LogicalModel, MediaInput, ProviderType,
};
use crate::utils::http_headers::ProviderHeaders;

/// Anthropic Messages API backend
pub struct AnthropicBackend {
    core: BackendCore,
    base_url: String,
}

impl AnthropicBackend {
    /// Build the backend over an existing HTTP client
    pub fn new(config: ProviderConfig, http_client: reqwest::Client, retry: RetryPolicy) -> Self {
        let base_url = config.base_url().to_string();
        let url = format!("{base_url}/v1/messages");
        let config = Arc::new(config);
        let header_config = Arc::clone(&config);
        let build_headers: HeadersHook = Box::new(move || {
            let api_key = header_config
                .api_key()
                .ok_or_else(|| missing_key_error(ProviderType::Anthropic))?;
            ProviderHeaders::anthropic(api_key, &header_config.headers)
        });
        let core = BackendCore::http(
            url,
            &config,
            http_client,
            build_headers,
            Arc::new(AnthropicRequestTransformer),
            Arc::new(AnthropicResponseTransformer),
            retry,
        );
        Self { core, base_url }
    }

    /// Validate the configuration and build a backend with its own client
    pub fn from_config(config: ProviderConfig) -> Result<Self, CaptionError> {
        config.validate(ProviderType::Anthropic)?;
        Ok(Self::new(config, default_http_client()?, RetryPolicy::default()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl std::fmt::Debug for AnthropicBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicBackend")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CaptionBackend for AnthropicBackend {
    fn provider(&self) -> ProviderType {
        self.core.provider()
    }

    async fn analyze_image(
        &self,
        model: LogicalModel,
        media: &MediaInput,
    ) -> Result<Analysis, CaptionError> {
        self.core.analyze(model, media).await
    }

    async fn generate_caption(
        &self,
        model: LogicalModel,
        analysis: &Analysis,
        request: &CaptionRequest,
    ) -> Result<CaptionResult, CaptionError> {
        self.core.caption(model, analysis, request).await
    }
}
