//! # Captionist - multi-model captions for music photos
//!
//! Captionist turns an uploaded concert, studio or rehearsal photo into a
//! structured visual analysis and a styled, localized social-media caption.
//!
#![deny(unsafe_code)]

//! ## Features
//!
//! - **Interchangeable backends**: OpenAI and Anthropic adapters behind one trait
//! - **Routing by logical model**: analysis and caption models are picked per request
//! - **Graceful degradation**: provider failures yield deterministic fallback content
//! - **Model comparison**: one image analyzed by several models concurrently
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use captionist::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let orchestrator = CaptionOrchestrator::from_config(CaptionConfig::from_env()?)?;
//!
//!     let media = MediaInput::new(std::fs::read("gig.jpg")?, "gig.jpg");
//!     let options = PipelineOptions::new()
//!         .with_analysis_model(LogicalModel::ClaudeSonnet)
//!         .with_request(CaptionRequest::new(CaptionStyle::Poetic, Language::English));
//!
//!     let result = orchestrator.analyze_and_generate(&media, &options).await?;
//!     println!("{}", result.caption.caption);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod executors;
pub mod fallback;
pub mod orchestrator;
pub mod parser;
pub mod prompts;
pub mod providers;
pub mod retry;
pub mod router;
pub mod store;
pub mod telemetry;
pub mod traits;
pub mod transformers;
pub mod types;
pub mod utils;

pub use config::{CaptionConfig, ProviderConfig};
pub use error::{CaptionError, ErrorCategory};
pub use orchestrator::CaptionOrchestrator;
pub use types::available_options;

/// Commonly used types
pub mod prelude {
    pub use crate::config::{CaptionConfig, ProviderConfig};
    pub use crate::error::{CaptionError, ErrorCategory};
    pub use crate::orchestrator::{
        CaptionOrchestrator, ComparisonOutcome, ModelComparison, PipelineOptions, PipelineResult,
    };
    pub use crate::router::ModelRouter;
    pub use crate::store::{CaptionRecord, CaptionStore, InMemoryCaptionStore};
    pub use crate::traits::CaptionBackend;
    pub use crate::types::{
        Analysis, CaptionContext, CaptionRequest, CaptionResult, CaptionStyle, Language,
        LogicalModel, MediaInput, Operation, ProviderType, available_options,
    };
}
