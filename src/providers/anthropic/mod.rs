//! Anthropic adapter
//!
//! Messages API: the image travels as a base64 source block ahead of the
//! analysis prompt; caption calls put the system prompt at the top level.

pub mod client;
pub mod transformers;

pub use client::AnthropicBackend;
pub use transformers::{AnthropicRequestTransformer, AnthropicResponseTransformer};
