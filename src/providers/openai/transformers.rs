//! Transformers for OpenAI Chat Completions

use serde_json::json;

use crate::error::CaptionError;
use crate::prompts;
use crate::transformers::{RequestTransformer, ResponseTransformer};
use crate::types::{Analysis, CaptionRequest, LogicalModel, MediaInput, ProviderType};

pub const ANALYSIS_MAX_TOKENS: u32 = 600;
pub const CAPTION_MAX_TOKENS: u32 = 400;
pub const CAPTION_TEMPERATURE: f64 = 0.8;

/// Request transformer for OpenAI
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAiRequestTransformer;

impl RequestTransformer for OpenAiRequestTransformer {
    fn provider(&self) -> ProviderType {
        ProviderType::OpenAi
    }

    fn transform_analysis(
        &self,
        model: LogicalModel,
        media: &MediaInput,
    ) -> Result<serde_json::Value, CaptionError> {
        let data_url = format!(
            "data:{};base64,{}",
            media.image_mime_type(),
            media.base64_data()
        );
        Ok(json!({
            "model": model.id(),
            "messages": [{
                "role": "user",
                "content": [
                    { "type": "text", "text": prompts::analysis_prompt() },
                    { "type": "image_url", "image_url": { "url": data_url } }
                ]
            }],
            "max_tokens": ANALYSIS_MAX_TOKENS
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
            "messages": [
                {
                    "role": "system",
                    "content": prompts::system_prompt(request.style, request.language)
                },
                {
                    "role": "user",
                    "content": prompts::caption_prompt(
                        analysis,
                        request.style,
                        request.language,
                        &request.context,
                    )
                }
            ],
            "max_tokens": CAPTION_MAX_TOKENS,
            "temperature": CAPTION_TEMPERATURE
        }))
    }
}

/// Response transformer for OpenAI: `choices[0].message.content`
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAiResponseTransformer;

impl ResponseTransformer for OpenAiResponseTransformer {
    fn provider(&self) -> ProviderType {
        ProviderType::OpenAi
    }

    fn extract_text(&self, raw: &serde_json::Value) -> Result<String, CaptionError> {
        raw.pointer("/choices/0/message/content")
            .and_then(|c| c.as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                CaptionError::Parse("OpenAI response contained no message content".to_string())
            })
    }
}
