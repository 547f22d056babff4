//! Model router
//!
//! Maps a logical model and an operation to the backend that serves it.
//! Pure lookup over backends built once at startup.

use std::sync::Arc;

use crate::config::CaptionConfig;
use crate::error::CaptionError;
use crate::providers::{AnthropicBackend, OpenAiBackend, default_http_client};
use crate::traits::CaptionBackend;
use crate::types::{LogicalModel, Operation, ProviderType};

/// Provider serving `model` for `operation`, or `None` when the pair is unsupported
pub const fn route(model: LogicalModel, operation: Operation) -> Option<ProviderType> {
    match (model, operation) {
        (LogicalModel::Gpt4Vision, Operation::Analyze | Operation::Generate) => {
            Some(ProviderType::OpenAi)
        }
        (LogicalModel::Gpt4, Operation::Generate) => Some(ProviderType::OpenAi),
        (LogicalModel::Gpt4, Operation::Analyze) => None,
        (
            LogicalModel::ClaudeSonnet | LogicalModel::ClaudeHaiku,
            Operation::Analyze | Operation::Generate,
        ) => Some(ProviderType::Anthropic),
    }
}

/// Dispatch table from logical models to backends
#[derive(Clone)]
pub struct ModelRouter {
    openai: Arc<dyn CaptionBackend>,
    anthropic: Arc<dyn CaptionBackend>,
}

impl ModelRouter {
    pub fn builder() -> ModelRouterBuilder {
        ModelRouterBuilder::default()
    }

    /// Built-in backends for every provider, sharing one HTTP client
    pub fn from_config(config: CaptionConfig) -> Result<Self, CaptionError> {
        Self::builder().config(config).build()
    }

    /// Backend for a model and operation
    pub fn resolve(
        &self,
        model: LogicalModel,
        operation: Operation,
    ) -> Result<Arc<dyn CaptionBackend>, CaptionError> {
        let provider =
            route(model, operation).ok_or(CaptionError::UnsupportedModel { model, operation })?;
        tracing::debug!(model = %model, %operation, %provider, "routing request");
        Ok(Arc::clone(self.backend(provider)))
    }

    /// Backend registered for a provider
    pub fn backend(&self, provider: ProviderType) -> &Arc<dyn CaptionBackend> {
        match provider {
            ProviderType::OpenAi => &self.openai,
            ProviderType::Anthropic => &self.anthropic,
        }
    }
}

impl std::fmt::Debug for ModelRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRouter")
            .field("providers", &ProviderType::ALL)
            .finish()
    }
}

/// Builder for [`ModelRouter`]. Providers without an explicit backend get the
/// built-in adapter configured from [`CaptionConfig`].
#[derive(Default)]
pub struct ModelRouterBuilder {
    config: Option<CaptionConfig>,
    http_client: Option<reqwest::Client>,
    openai: Option<Arc<dyn CaptionBackend>>,
    anthropic: Option<Arc<dyn CaptionBackend>>,
}

impl ModelRouterBuilder {
    pub fn config(mut self, config: CaptionConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Reuse an existing HTTP client for the built-in adapters
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Serve the backend's provider with a custom implementation
    pub fn backend(mut self, backend: Arc<dyn CaptionBackend>) -> Self {
        match backend.provider() {
            ProviderType::OpenAi => self.openai = Some(backend),
            ProviderType::Anthropic => self.anthropic = Some(backend),
        }
        self
    }

    pub fn build(self) -> Result<ModelRouter, CaptionError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;
        let CaptionConfig {
            openai,
            anthropic,
            retry,
            ..
        } = config;

        let http_client = match self.http_client {
            Some(client) => client,
            None => default_http_client()?,
        };

        let openai: Arc<dyn CaptionBackend> = match self.openai {
            Some(backend) => backend,
            None => Arc::new(OpenAiBackend::new(openai, http_client.clone(), retry.clone())),
        };
        let anthropic: Arc<dyn CaptionBackend> = match self.anthropic {
            Some(backend) => backend,
            None => Arc::new(AnthropicBackend::new(anthropic, http_client, retry)),
        };
        Ok(ModelRouter { openai, anthropic })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_agrees_with_model_capabilities() {
        for model in LogicalModel::ALL {
            for operation in [Operation::Analyze, Operation::Generate] {
                let routed = route(model, operation);
                assert_eq!(routed.is_some(), model.supports(operation), "{model} {operation}");
                if let Some(provider) = routed {
                    assert_eq!(provider, model.provider());
                }
            }
        }
    }

    #[test]
    fn resolves_built_in_backends() {
        let router = ModelRouter::from_config(CaptionConfig::default()).unwrap();
        for model in LogicalModel::ALL {
            for operation in [Operation::Analyze, Operation::Generate] {
                match router.resolve(model, operation) {
                    Ok(backend) => assert_eq!(backend.provider(), model.provider()),
                    Err(err) => {
                        assert_eq!(
                            err,
                            CaptionError::UnsupportedModel { model, operation }
                        );
                        assert_eq!((model, operation), (LogicalModel::Gpt4, Operation::Analyze));
                    }
                }
            }
        }
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = CaptionConfig {
            call_timeout: std::time::Duration::ZERO,
            ..CaptionConfig::default()
        };
        assert!(ModelRouter::from_config(config).is_err());
    }
}
