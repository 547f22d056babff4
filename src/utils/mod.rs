//! Utility modules
//!
//! Small helpers shared by the adapters and the orchestrator.

pub mod http_headers;
pub mod mime;
pub mod text;

pub use http_headers::{HttpHeaderBuilder, ProviderHeaders};
pub use text::extract_hashtags;
