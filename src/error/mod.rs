//! Error Handling Module
//!
//! Provides the crate-wide [`CaptionError`] type and its classification helpers.
//!
//! Only [`CaptionError::UnsupportedModel`], [`CaptionError::Validation`] and
//! [`CaptionError::Persistence`] are meant to reach callers of the orchestrator.
//! Provider, timeout and parse failures are absorbed by the adapters and turned
//! into fallback results.
//!
//! # Example
//!
//! ```rust
//! use captionist::error::{CaptionError, ErrorCategory};
//!
//! let error = CaptionError::Validation("missing filename".into());
//! assert_eq!(error.category(), ErrorCategory::Client);
//! assert!(!error.is_recoverable());
//! ```

pub mod types;

pub use types::*;
