//! Response transformation traits

use crate::error::CaptionError;
use crate::types::ProviderType;

/// Extract reply text from provider-specific response JSON
pub trait ResponseTransformer: Send + Sync {
    fn provider(&self) -> ProviderType;

    /// Text content of the first reply; a reply without text is a `Parse` error
    fn extract_text(&self, raw: &serde_json::Value) -> Result<String, CaptionError>;
}
