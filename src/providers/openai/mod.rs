//! OpenAI adapter
//!
//! Chat Completions API: vision analysis through an `image_url` data URL,
//! captions through a system + user message pair.

pub mod client;
pub mod transformers;

pub use client::OpenAiBackend;
pub use transformers::{OpenAiRequestTransformer, OpenAiResponseTransformer};
