//! Logical model identifiers, providers and display metadata

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CaptionError;

/// Backend provider that owns a logical model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    OpenAi,
    Anthropic,
}

impl ProviderType {
    pub const ALL: [ProviderType; 2] = [ProviderType::OpenAi, ProviderType::Anthropic];

    /// Stable identifier, also used as the source label in parse errors
    pub const fn id(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
        }
    }

    /// Human-facing provider name
    pub const fn label(self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Anthropic => "Anthropic",
        }
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Kind of work requested from a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Image analysis (requires vision input)
    Analyze,
    /// Caption generation (text only)
    Generate,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Analyze => f.write_str("analyze"),
            Self::Generate => f.write_str("generate"),
        }
    }
}

/// What a logical model can take as input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelCapabilities {
    pub vision: bool,
    pub text_generation: bool,
}

/// A specific backend and variant combination, decoupled from transport details
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogicalModel {
    #[serde(rename = "gpt-4-vision-preview")]
    Gpt4Vision,
    #[serde(rename = "gpt-4")]
    Gpt4,
    #[serde(rename = "claude-3-5-sonnet-20241022")]
    ClaudeSonnet,
    #[serde(rename = "claude-3-5-haiku-20241022")]
    ClaudeHaiku,
}

impl LogicalModel {
    pub const ALL: [LogicalModel; 4] = [
        LogicalModel::Gpt4Vision,
        LogicalModel::Gpt4,
        LogicalModel::ClaudeSonnet,
        LogicalModel::ClaudeHaiku,
    ];

    /// Default model for image analysis
    pub const DEFAULT_ANALYSIS: LogicalModel = LogicalModel::Gpt4Vision;
    /// Default model for caption generation
    pub const DEFAULT_CAPTION: LogicalModel = LogicalModel::Gpt4;

    /// Provider-side model id, sent on the wire
    pub const fn id(self) -> &'static str {
        match self {
            Self::Gpt4Vision => "gpt-4-vision-preview",
            Self::Gpt4 => "gpt-4",
            Self::ClaudeSonnet => "claude-3-5-sonnet-20241022",
            Self::ClaudeHaiku => "claude-3-5-haiku-20241022",
        }
    }

    pub const fn provider(self) -> ProviderType {
        match self {
            Self::Gpt4Vision | Self::Gpt4 => ProviderType::OpenAi,
            Self::ClaudeSonnet | Self::ClaudeHaiku => ProviderType::Anthropic,
        }
    }

    pub const fn capabilities(self) -> ModelCapabilities {
        match self {
            Self::Gpt4 => ModelCapabilities {
                vision: false,
                text_generation: true,
            },
            Self::Gpt4Vision | Self::ClaudeSonnet | Self::ClaudeHaiku => ModelCapabilities {
                vision: true,
                text_generation: true,
            },
        }
    }

    /// Whether this model can serve the given operation
    pub const fn supports(self, operation: Operation) -> bool {
        let caps = self.capabilities();
        match operation {
            Operation::Analyze => caps.vision,
            Operation::Generate => caps.text_generation,
        }
    }

    /// Display metadata for option listings
    pub fn info(self) -> &'static ModelInfo {
        match self {
            Self::Gpt4Vision => &MODEL_INFO[0],
            Self::Gpt4 => &MODEL_INFO[1],
            Self::ClaudeSonnet => &MODEL_INFO[2],
            Self::ClaudeHaiku => &MODEL_INFO[3],
        }
    }
}

impl fmt::Display for LogicalModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for LogicalModel {
    type Err = CaptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.id() == s)
            .ok_or_else(|| CaptionError::Validation(format!("Unknown model: {s}")))
    }
}

/// Presentation metadata for a logical model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInfo {
    pub model: LogicalModel,
    pub name: &'static str,
    /// Shown in the analysis model picker; `None` keeps the model out of that list
    pub analysis_description: Option<&'static str>,
    /// Shown in the caption model picker; `None` keeps the model out of that list
    pub caption_description: Option<&'static str>,
}

static MODEL_INFO: [ModelInfo; 4] = [
    ModelInfo {
        model: LogicalModel::Gpt4Vision,
        name: "GPT-4 Vision",
        analysis_description: Some("Best for detailed visual analysis"),
        caption_description: None,
    },
    ModelInfo {
        model: LogicalModel::Gpt4,
        name: "GPT-4",
        analysis_description: None,
        caption_description: Some("Creative and engaging captions"),
    },
    ModelInfo {
        model: LogicalModel::ClaudeSonnet,
        name: "Claude 3.5 Sonnet",
        analysis_description: Some("Excellent reasoning and understanding"),
        caption_description: Some("Sophisticated and nuanced writing"),
    },
    ModelInfo {
        model: LogicalModel::ClaudeHaiku,
        name: "Claude 3.5 Haiku",
        analysis_description: Some("Fast and efficient"),
        caption_description: Some("Quick caption generation"),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_from_str() {
        for model in LogicalModel::ALL {
            assert_eq!(model.id().parse::<LogicalModel>().unwrap(), model);
            assert_eq!(model.info().model, model);
        }
        assert!(matches!(
            "gpt-5".parse::<LogicalModel>(),
            Err(CaptionError::Validation(_))
        ));
    }

    #[test]
    fn serde_uses_wire_ids() {
        let json = serde_json::to_string(&LogicalModel::ClaudeHaiku).unwrap();
        assert_eq!(json, "\"claude-3-5-haiku-20241022\"");
        let back: LogicalModel = serde_json::from_str("\"gpt-4\"").unwrap();
        assert_eq!(back, LogicalModel::Gpt4);
    }

    #[test]
    fn text_only_model_cannot_analyze() {
        assert!(!LogicalModel::Gpt4.supports(Operation::Analyze));
        assert!(LogicalModel::Gpt4.supports(Operation::Generate));
        assert!(LogicalModel::ClaudeHaiku.supports(Operation::Analyze));
        assert_eq!(LogicalModel::ClaudeSonnet.provider(), ProviderType::Anthropic);
    }
}
