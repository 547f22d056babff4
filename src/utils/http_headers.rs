//! Request headers for the built-in adapters

use std::collections::HashMap;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};

use crate::error::CaptionError;

/// Anthropic API version pinned by the adapter
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Accumulates validated headers; invalid names or values are configuration errors
#[derive(Debug, Default)]
pub struct HttpHeaderBuilder {
    headers: HeaderMap,
}

impl HttpHeaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// `Authorization: Bearer <token>`, marked sensitive
    pub fn with_bearer_auth(self, token: &str) -> Result<Self, CaptionError> {
        let value = secret_value("Authorization", &format!("Bearer {token}"))?;
        Ok(self.insert(AUTHORIZATION, value))
    }

    /// `x-api-key: <key>`, marked sensitive
    pub fn with_api_key_header(self, key: &str) -> Result<Self, CaptionError> {
        let value = secret_value("x-api-key", key)?;
        Ok(self.insert(HeaderName::from_static("x-api-key"), value))
    }

    pub fn with_json_content_type(self) -> Self {
        self.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"))
    }

    pub fn with_header(self, name: &str, value: &str) -> Result<Self, CaptionError> {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            CaptionError::Configuration(format!("Invalid header name '{name}': {e}"))
        })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| {
            CaptionError::Configuration(format!("Invalid header value for '{name}': {e}"))
        })?;
        Ok(self.insert(header_name, header_value))
    }

    /// Caller-supplied extras, applied last so they can override defaults
    pub fn with_custom_headers(
        self,
        custom: &HashMap<String, String>,
    ) -> Result<Self, CaptionError> {
        custom
            .iter()
            .try_fold(self, |builder, (name, value)| builder.with_header(name, value))
    }

    pub fn build(self) -> HeaderMap {
        self.headers
    }

    fn insert(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

fn secret_value(name: &str, raw: &str) -> Result<HeaderValue, CaptionError> {
    let mut value = HeaderValue::from_str(raw)
        .map_err(|e| CaptionError::Configuration(format!("Invalid {name} header: {e}")))?;
    value.set_sensitive(true);
    Ok(value)
}

/// Complete header sets per provider
pub struct ProviderHeaders;

impl ProviderHeaders {
    pub fn openai(
        api_key: &str,
        custom: &HashMap<String, String>,
    ) -> Result<HeaderMap, CaptionError> {
        Ok(HttpHeaderBuilder::new()
            .with_bearer_auth(api_key)?
            .with_json_content_type()
            .with_custom_headers(custom)?
            .build())
    }

    pub fn anthropic(
        api_key: &str,
        custom: &HashMap<String, String>,
    ) -> Result<HeaderMap, CaptionError> {
        Ok(HttpHeaderBuilder::new()
            .with_api_key_header(api_key)?
            .with_header("anthropic-version", ANTHROPIC_VERSION)?
            .with_json_content_type()
            .with_custom_headers(custom)?
            .build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anthropic_headers_include_version_and_key() {
        let headers = ProviderHeaders::anthropic("k", &HashMap::new()).unwrap();
        assert_eq!(
            headers.get("x-api-key").and_then(|v| v.to_str().ok()),
            Some("k")
        );
        assert_eq!(
            headers.get("anthropic-version").and_then(|v| v.to_str().ok()),
            Some(ANTHROPIC_VERSION)
        );
        assert_eq!(
            headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
    }

    #[test]
    fn openai_headers_use_bearer_auth() {
        let mut custom = HashMap::new();
        custom.insert("OpenAI-Organization".to_string(), "org-1".to_string());
        let headers = ProviderHeaders::openai("sk-test", &custom).unwrap();
        assert_eq!(
            headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()),
            Some("Bearer sk-test")
        );
        assert!(headers.contains_key("openai-organization"));
        assert!(headers.get(AUTHORIZATION).is_some_and(HeaderValue::is_sensitive));
    }

    #[test]
    fn rejects_invalid_header_values() {
        let err = HttpHeaderBuilder::new()
            .with_header("x-test", "bad\nvalue")
            .err()
            .unwrap();
        assert!(matches!(err, CaptionError::Configuration(_)));
    }
}
