//! Executors Layer
//!
//! HTTP plumbing shared by the provider adapters: posts a transformed JSON
//! body and hands the reply to a response transformer.

pub mod chat;

pub use chat::{ChatExecutor, HttpChatExecutor};

/// Hook producing the request headers for every call.
/// Missing credentials surface here as an authentication error.
pub type HeadersHook = Box<
    dyn Fn() -> Result<reqwest::header::HeaderMap, crate::error::CaptionError> + Send + Sync,
>;
