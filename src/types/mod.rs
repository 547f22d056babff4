//! Core data types shared by every layer of the orchestrator

pub mod analysis;
pub mod caption;
pub mod language;
pub mod media;
pub mod model;
pub mod options;
pub mod style;

pub use analysis::Analysis;
pub use caption::{CaptionContext, CaptionRequest, CaptionResult, CaptionShape};
pub use language::Language;
pub use media::MediaInput;
pub use model::{LogicalModel, ModelCapabilities, ModelInfo, Operation, ProviderType};
pub use options::{AvailableOptions, available_options};
pub use style::{CaptionStyle, CountRange, StyleProfile};
