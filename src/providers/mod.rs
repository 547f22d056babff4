//! Provider adapters
//!
//! Each adapter pairs a request transformer (canonical intent to provider
//! JSON) with a response transformer (provider JSON to reply text) over the
//! shared [`HttpChatExecutor`](crate::executors::HttpChatExecutor).
//! Provider-side failures never leave an adapter: they are logged and
//! replaced by [`fallback`](crate::fallback) content.

pub mod anthropic;
pub mod openai;

pub use anthropic::AnthropicBackend;
pub use openai::OpenAiBackend;

use std::sync::Arc;

use crate::config::ProviderConfig;
use crate::error::CaptionError;
use crate::executors::{ChatExecutor, HeadersHook, HttpChatExecutor};
use crate::fallback::{fallback_analysis, fallback_caption_with_error};
use crate::parser::{parse_analysis, reason};
use crate::retry::{RetryExecutor, RetryPolicy};
use crate::transformers::{RequestTransformer, ResponseTransformer};
use crate::types::{
    Analysis, CaptionRequest, CaptionResult, LogicalModel, MediaInput, ProviderType,
};

/// Shared call path of the built-in adapters
pub(crate) struct BackendCore {
    provider: ProviderType,
    executor: Arc<dyn ChatExecutor>,
    request_transformer: Arc<dyn RequestTransformer>,
    retry: RetryPolicy,
}

impl BackendCore {
    pub(crate) fn new(
        provider: ProviderType,
        executor: Arc<dyn ChatExecutor>,
        request_transformer: Arc<dyn RequestTransformer>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            provider,
            executor,
            request_transformer,
            retry,
        }
    }

    /// Wire an [`HttpChatExecutor`] for a provider endpoint
    pub(crate) fn http(
        url: String,
        config: &ProviderConfig,
        http_client: reqwest::Client,
        build_headers: HeadersHook,
        request_transformer: Arc<dyn RequestTransformer>,
        response_transformer: Arc<dyn ResponseTransformer>,
        retry: RetryPolicy,
    ) -> Self {
        let provider = request_transformer.provider();
        let executor = Arc::new(HttpChatExecutor {
            provider,
            http_client,
            url,
            response_transformer,
            build_headers,
            request_timeout: config.request_timeout,
        });
        Self::new(provider, executor, request_transformer, retry)
    }

    pub(crate) fn provider(&self) -> ProviderType {
        self.provider
    }

    pub(crate) async fn analyze(
        &self,
        model: LogicalModel,
        media: &MediaInput,
    ) -> Result<Analysis, CaptionError> {
        let outcome = match self.request_transformer.transform_analysis(model, media) {
            Ok(body) => self.call(body).await,
            Err(err) => Err(err),
        };
        match outcome {
            Ok(text) => Ok(parse_analysis(&text, self.provider.id())),
            Err(err) if err.is_recoverable() => {
                tracing::warn!(
                    provider = %self.provider,
                    model = %model,
                    error = %err,
                    "analysis failed, using fallback"
                );
                Ok(fallback_analysis(reason(err)))
            }
            Err(err) => Err(err),
        }
    }

    pub(crate) async fn caption(
        &self,
        model: LogicalModel,
        analysis: &Analysis,
        request: &CaptionRequest,
    ) -> Result<CaptionResult, CaptionError> {
        let outcome = match self
            .request_transformer
            .transform_caption(model, analysis, request)
        {
            Ok(body) => self.call(body).await,
            Err(err) => Err(err),
        };
        match outcome {
            Ok(text) if !text.trim().is_empty() => Ok(CaptionResult::from_text(
                &text,
                request.style,
                request.language,
                Some(model.id().to_string()),
            )),
            Ok(_) => {
                tracing::warn!(provider = %self.provider, model = %model, "empty caption, using fallback");
                Ok(fallback_caption_with_error(
                    request.style,
                    request.language,
                    format!("Empty caption from {}", self.provider.id()),
                ))
            }
            Err(err) if err.is_recoverable() => {
                tracing::warn!(
                    provider = %self.provider,
                    model = %model,
                    error = %err,
                    "caption generation failed, using fallback"
                );
                Ok(fallback_caption_with_error(
                    request.style,
                    request.language,
                    reason(err),
                ))
            }
            Err(err) => Err(err),
        }
    }

    async fn call(&self, body: serde_json::Value) -> Result<String, CaptionError> {
        RetryExecutor::new(self.retry.clone())
            .execute(|| self.executor.execute(body.clone()))
            .await
    }
}

/// HTTP client shared by the built-in adapters. Timeouts are applied per request.
pub fn default_http_client() -> Result<reqwest::Client, CaptionError> {
    reqwest::Client::builder()
        .build()
        .map_err(|e| CaptionError::Configuration(format!("Failed to build HTTP client: {e}")))
}

/// Error reported when a call is attempted without an API key
pub(crate) fn missing_key_error(provider: ProviderType) -> CaptionError {
    CaptionError::provider_status(
        provider,
        401,
        format!("{} API key not configured", provider.label()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CaptionStyle, Language};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;
    use tracing_test::traced_test;

    struct ScriptedExecutor {
        replies: Mutex<Vec<Result<String, CaptionError>>>,
    }

    #[async_trait]
    impl ChatExecutor for ScriptedExecutor {
        async fn execute(&self, _body: serde_json::Value) -> Result<String, CaptionError> {
            self.replies
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(CaptionError::Timeout("script exhausted".into())))
        }
    }

    struct EchoTransformer;

    impl RequestTransformer for EchoTransformer {
        fn provider(&self) -> ProviderType {
            ProviderType::OpenAi
        }

        fn transform_analysis(
            &self,
            model: LogicalModel,
            _media: &MediaInput,
        ) -> Result<serde_json::Value, CaptionError> {
            Ok(json!({ "model": model.id() }))
        }

        fn transform_caption(
            &self,
            model: LogicalModel,
            _analysis: &Analysis,
            _request: &CaptionRequest,
        ) -> Result<serde_json::Value, CaptionError> {
            Ok(json!({ "model": model.id() }))
        }
    }

    fn core(replies: Vec<Result<String, CaptionError>>) -> BackendCore {
        BackendCore::new(
            ProviderType::OpenAi,
            Arc::new(ScriptedExecutor {
                replies: Mutex::new(replies),
            }),
            Arc::new(EchoTransformer),
            RetryPolicy::default(),
        )
    }

    fn media() -> MediaInput {
        MediaInput::new(vec![1u8, 2, 3], "gig.jpg")
    }

    #[tokio::test]
    #[traced_test]
    async fn auth_failure_becomes_fallback_analysis() {
        let backend = core(vec![Err(missing_key_error(ProviderType::OpenAi))]);
        let analysis = backend
            .analyze(LogicalModel::Gpt4Vision, &media())
            .await
            .unwrap();
        assert_eq!(analysis.confidence(), Some(0.5));
        assert!(
            analysis
                .error()
                .unwrap()
                .contains("OpenAI API key not configured")
        );
        assert!(logs_contain("analysis failed, using fallback"));
    }

    #[tokio::test]
    async fn configuration_errors_surface() {
        let backend = core(vec![Err(CaptionError::Configuration("bad header".into()))]);
        let err = backend
            .analyze(LogicalModel::Gpt4Vision, &media())
            .await
            .unwrap_err();
        assert!(matches!(err, CaptionError::Configuration(_)));
    }

    #[tokio::test]
    async fn caption_text_is_trimmed_and_tagged() {
        let backend = core(vec![Ok("  Jazz night. 🎷 #jazz #live  ".into())]);
        let request = CaptionRequest::new(CaptionStyle::Minimal, Language::English);
        let caption = backend
            .caption(LogicalModel::Gpt4, &Analysis::new(), &request)
            .await
            .unwrap();
        assert_eq!(caption.caption, "Jazz night. 🎷 #jazz #live");
        assert_eq!(caption.hashtags, vec!["#jazz", "#live"]);
        assert_eq!(caption.model_used.as_deref(), Some("gpt-4"));
        assert!(!caption.fallback);
    }

    #[tokio::test]
    async fn empty_caption_falls_back() {
        let backend = core(vec![Ok("   ".into())]);
        let request = CaptionRequest::new(CaptionStyle::Casual, Language::German);
        let caption = backend
            .caption(LogicalModel::Gpt4, &Analysis::new(), &request)
            .await
            .unwrap();
        assert!(caption.fallback);
        assert_eq!(caption.language, Language::German);
        assert!(caption.error.is_some());
    }
}
