//! Backend capability trait

use async_trait::async_trait;

use crate::error::CaptionError;
use crate::types::{Analysis, CaptionRequest, CaptionResult, LogicalModel, MediaInput, ProviderType};

/// One AI provider able to analyze media and write captions.
///
/// Built-in backends absorb provider-side faults (transport, auth, timeout,
/// bad status, unparseable reply) and return fallback content instead of
/// `Err`. Custom backends may return recoverable errors; the orchestrator
/// substitutes fallback content for those as well.
#[async_trait]
pub trait CaptionBackend: Send + Sync {
    fn provider(&self) -> ProviderType;

    /// Structured visual analysis of an uploaded image
    async fn analyze_image(
        &self,
        model: LogicalModel,
        media: &MediaInput,
    ) -> Result<Analysis, CaptionError>;

    /// Styled caption for a previously produced analysis
    async fn generate_caption(
        &self,
        model: LogicalModel,
        analysis: &Analysis,
        request: &CaptionRequest,
    ) -> Result<CaptionResult, CaptionError>;
}
