//! Transformers for the Anthropic Messages API

use serde_json::json;

use crate::error::CaptionError;
use crate::prompts;
use crate::transformers::{RequestTransformer, ResponseTransformer};
use crate::types::{Analysis, CaptionRequest, LogicalModel, MediaInput, ProviderType};

pub const ANALYSIS_MAX_TOKENS: u32 = 1024;
pub const CAPTION_MAX_TOKENS: u32 = 500;

/// Request transformer for Anthropic
#[derive(Debug, Clone, Copy, Default)]
pub struct AnthropicRequestTransformer;

impl RequestTransformer for AnthropicRequestTransformer {
    fn provider(&self) -> ProviderType {
        ProviderType::Anthropic
    }

    fn transform_analysis(
        &self,
        model: LogicalModel,
        media: &MediaInput,
    ) -> Result<serde_json::Value, CaptionError> {
        Ok(json!({
            "model": model.id(),
            "max_tokens": ANALYSIS_MAX_TOKENS,
            "messages": [{
                "role": "user",
                "content": [
                    {
                        "type": "image",
                        "source": {
                            "type": "base64",
                            "media_type": media.image_mime_type(),
                            "data": media.base64_data()
                        }
                    },
                    { "type": "text", "text": prompts::analysis_prompt() }
                ]
            }]
        }))
    }

    fn transform_caption(
        &self,
        model: LogicalModel,
        analysis: &Analysis,
        request: &CaptionRequest,
    ) -> Result<serde_json::Value, CaptionError> {
        Ok(json!({
            "model": model.id(),
            "max_tokens": CAPTION_MAX_TOKENS,
            "system": prompts::system_prompt(request.style, request.language),
            "messages": [{
                "role": "user",
                "content": prompts::caption_prompt(
                    analysis,
                    request.style,
                    request.language,
                    &request.context,
                )
            }]
        }))
    }
}

/// Response transformer for Anthropic: concatenated `text` content blocks
#[derive(Debug, Clone, Copy, Default)]
pub struct AnthropicResponseTransformer;

impl ResponseTransformer for AnthropicResponseTransformer {
    fn provider(&self) -> ProviderType {
        ProviderType::Anthropic
    }

    fn extract_text(&self, raw: &serde_json::Value) -> Result<String, CaptionError> {
        let blocks = raw
            .get("content")
            .and_then(|c| c.as_array())
            .ok_or_else(|| {
                CaptionError::Parse("Anthropic response contained no content".to_string())
            })?;
        let text: String = blocks
            .iter()
            .filter(|block| block.get("type").and_then(|t| t.as_str()) == Some("text"))
            .filter_map(|block| block.get("text").and_then(|t| t.as_str()))
            .collect();
        if text.is_empty() {
            return Err(CaptionError::Parse(
                "Anthropic response contained no text blocks".to_string(),
            ));
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CaptionContext, CaptionStyle, Language};

    #[test]
    fn analysis_body_puts_image_before_prompt() {
        let media = MediaInput::new(b"hello".to_vec(), "band.webp");
        let body = AnthropicRequestTransformer
            .transform_analysis(LogicalModel::ClaudeHaiku, &media)
            .unwrap();
        assert_eq!(body["model"], "claude-3-5-haiku-20241022");
        assert_eq!(body["max_tokens"], 1024);
        let content = &body["messages"][0]["content"];
        assert_eq!(content[0]["type"], "image");
        assert_eq!(content[0]["source"]["media_type"], "image/webp");
        assert_eq!(content[0]["source"]["data"], "aGVsbG8=");
        assert_eq!(content[1]["type"], "text");
    }

    #[test]
    fn caption_body_uses_top_level_system() {
        let request = CaptionRequest::new(CaptionStyle::Casual, Language::French)
            .with_context(CaptionContext::new().with_venue("New Morning"));
        let body = AnthropicRequestTransformer
            .transform_caption(LogicalModel::ClaudeSonnet, &Analysis::new(), &request)
            .unwrap();
        assert_eq!(body["max_tokens"], 500);
        assert!(body["system"].as_str().unwrap().contains("native-level French"));
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
        assert!(
            body["messages"][0]["content"]
                .as_str()
                .unwrap()
                .contains("Venue: New Morning")
        );
    }

    #[test]
    fn joins_text_blocks_and_skips_others() {
        let raw = serde_json::json!({
            "content": [
                { "type": "text", "text": "{\"genre\":" },
                { "type": "tool_use", "id": "t1" },
                { "type": "text", "text": "\"jazz\"}" }
            ]
        });
        assert_eq!(
            AnthropicResponseTransformer.extract_text(&raw).unwrap(),
            "{\"genre\":\"jazz\"}"
        );
        assert!(
            AnthropicResponseTransformer
                .extract_text(&serde_json::json!({ "content": [] }))
                .is_err()
        );
    }
}
