//! Core error types

use thiserror::Error;

use crate::types::{LogicalModel, Operation, ProviderType};

/// Coarse error classification used for logging and HTTP status mapping by callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The caller asked for something invalid (bad input, unsupported model)
    Client,
    /// A backend failed or replied with something unusable
    Provider,
    /// Local setup problem or a collaborator (store) failure
    Internal,
}

/// Errors produced by the caption orchestrator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CaptionError {
    /// The logical model has no adapter for the requested operation
    #[error("Unsupported model: {model} cannot be used to {operation}")]
    UnsupportedModel {
        model: LogicalModel,
        operation: Operation,
    },

    /// Transport or authentication failure talking to a backend
    #[error("{provider} request failed: {message}")]
    Provider {
        provider: ProviderType,
        status: Option<u16>,
        message: String,
    },

    /// The backend did not answer within the allotted time
    #[error("Timeout: {0}")]
    Timeout(String),

    /// The backend replied but its content could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// Malformed caller input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid configuration (base URL, header values, HTTP client setup)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The persistence collaborator rejected the record
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl CaptionError {
    /// Shorthand for a provider failure with an HTTP status
    pub fn provider_status(provider: ProviderType, status: u16, message: impl Into<String>) -> Self {
        Self::Provider {
            provider,
            status: Some(status),
            message: message.into(),
        }
    }

    /// Shorthand for a provider failure without a status (transport level)
    pub fn transport(provider: ProviderType, message: impl Into<String>) -> Self {
        Self::Provider {
            provider,
            status: None,
            message: message.into(),
        }
    }

    /// HTTP status reported by the backend, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Provider { status, .. } => *status,
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnsupportedModel { .. } | Self::Validation(_) => ErrorCategory::Client,
            Self::Provider { .. } | Self::Timeout(_) | Self::Parse(_) => ErrorCategory::Provider,
            Self::Configuration(_) | Self::Persistence(_) => ErrorCategory::Internal,
        }
    }

    /// Backend-side faults that are replaced by fallback content instead of surfacing
    pub fn is_recoverable(&self) -> bool {
        self.category() == ErrorCategory::Provider
    }

    /// Whether another attempt against the same backend could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout(_) => true,
            Self::Provider { status: None, .. } => true,
            Self::Provider {
                status: Some(code), ..
            } => *code == 408 || *code == 429 || *code >= 500,
            _ => false,
        }
    }
}

impl From<serde_json::Error> for CaptionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
