//! Chat executor
//!
//! One JSON POST per call. Errors are classified so callers can decide
//! between retrying and falling back:
//! - transport failures and timeouts map to `Provider { status: None }` / `Timeout`
//! - non-2xx replies map to `Provider { status: Some(code) }`
//! - undecodable bodies map to `Parse`
//! - header values that cannot be sent map to `Provider { status: None }`

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::HeaderMap;

use super::HeadersHook;
use crate::error::CaptionError;
use crate::transformers::ResponseTransformer;
use crate::types::ProviderType;

#[async_trait::async_trait]
pub trait ChatExecutor: Send + Sync {
    /// Send a provider payload and return the reply text
    async fn execute(&self, body: serde_json::Value) -> Result<String, CaptionError>;
}

/// Generic HTTP-based ChatExecutor
pub struct HttpChatExecutor {
    pub provider: ProviderType,
    pub http_client: reqwest::Client,
    pub url: String,
    pub response_transformer: Arc<dyn ResponseTransformer>,
    pub build_headers: HeadersHook,
    pub request_timeout: Duration,
}

impl HttpChatExecutor {
    async fn send(&self, headers: HeaderMap, body: &serde_json::Value) -> Result<String, CaptionError> {
        let resp = self
            .http_client
            .post(&self.url)
            .timeout(self.request_timeout)
            .headers(headers)
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(CaptionError::provider_status(
                self.provider,
                status.as_u16(),
                error_message(&text, status),
            ));
        }

        let text = resp.text().await.map_err(|e| self.map_transport_error(e))?;
        let json: serde_json::Value = serde_json::from_str(&text).map_err(|e| {
            CaptionError::Parse(format!(
                "Failed to parse {} response JSON: {e}",
                self.provider.label()
            ))
        })?;
        self.response_transformer.extract_text(&json)
    }

    fn map_transport_error(&self, err: reqwest::Error) -> CaptionError {
        if err.is_timeout() {
            self.timeout_error()
        } else {
            CaptionError::transport(self.provider, err.to_string())
        }
    }

    fn timeout_error(&self) -> CaptionError {
        CaptionError::Timeout(format!(
            "{} request timed out after {}s",
            self.provider.label(),
            self.request_timeout.as_secs_f64()
        ))
    }
}

#[async_trait::async_trait]
impl ChatExecutor for HttpChatExecutor {
    async fn execute(&self, body: serde_json::Value) -> Result<String, CaptionError> {
        let headers = (self.build_headers)().map_err(|err| match err {
            CaptionError::Configuration(message) => CaptionError::Provider {
                provider: self.provider,
                status: None,
                message: format!("could not build request headers: {message}"),
            },
            other => other,
        })?;
        tracing::debug!(provider = %self.provider, url = %self.url, "sending provider request");
        match tokio::time::timeout(self.request_timeout, self.send(headers, &body)).await {
            Ok(result) => result,
            Err(_) => Err(self.timeout_error()),
        }
    }
}

/// Prefer the provider's `error.message`; otherwise the raw body or the status reason
fn error_message(body: &str, status: reqwest::StatusCode) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        });
    match from_json {
        Some(message) => message,
        None if !body.trim().is_empty() => body.trim().to_string(),
        None => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    }
}
