//! Request transformation traits

use crate::error::CaptionError;
use crate::types::{Analysis, CaptionRequest, LogicalModel, MediaInput, ProviderType};

/// Transform canonical requests into provider-specific payloads
pub trait RequestTransformer: Send + Sync {
    /// Provider this transformer targets
    fn provider(&self) -> ProviderType;

    /// Body for a vision analysis call: the analysis prompt plus the encoded image
    fn transform_analysis(
        &self,
        model: LogicalModel,
        media: &MediaInput,
    ) -> Result<serde_json::Value, CaptionError>;

    /// Body for a caption generation call: system prompt plus the caption prompt
    fn transform_caption(
        &self,
        model: LogicalModel,
        analysis: &Analysis,
        request: &CaptionRequest,
    ) -> Result<serde_json::Value, CaptionError>;
}
