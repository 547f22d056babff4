//! Caption requests and results

use serde::{Deserialize, Serialize};

use super::{CaptionStyle, Language, StyleProfile};
use crate::utils::text;

/// Caller-supplied context for caption generation. Never persisted here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub musicians: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_context: Option<String>,
}

impl CaptionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_musicians<I, S>(mut self, musicians: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list: Vec<String> = musicians.into_iter().map(Into::into).collect();
        self.musicians = (!list.is_empty()).then_some(list);
        self
    }

    /// Accepts the comma-separated form used by query strings
    pub fn with_musicians_csv(self, csv: &str) -> Self {
        self.with_musicians(
            csv.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty()),
        )
    }

    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = Some(venue.into());
        self
    }

    pub fn with_custom_context(mut self, context: impl Into<String>) -> Self {
        self.custom_context = Some(context.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.musicians.as_ref().is_none_or(Vec::is_empty)
            && self.venue.as_deref().is_none_or(str::is_empty)
            && self.custom_context.as_deref().is_none_or(str::is_empty)
    }
}

/// Semantic intent for one caption generation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionRequest {
    #[serde(default)]
    pub style: CaptionStyle,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub context: CaptionContext,
}

impl CaptionRequest {
    pub fn new(style: CaptionStyle, language: Language) -> Self {
        Self {
            style,
            language,
            context: CaptionContext::default(),
        }
    }

    pub fn with_context(mut self, context: CaptionContext) -> Self {
        self.context = context;
        self
    }
}

/// Generated caption
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionResult {
    pub caption: String,
    /// `#`-prefixed tokens of `caption`, in order, duplicates kept
    pub hashtags: Vec<String>,
    pub style: CaptionStyle,
    pub language: Language,
    /// Model that produced the text; absent for canned substitutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_used: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CaptionResult {
    /// Build a result from raw backend text (trimmed, hashtags extracted)
    pub fn from_text(
        text: &str,
        style: CaptionStyle,
        language: Language,
        model_used: Option<String>,
    ) -> Self {
        let caption = text.trim().to_string();
        let hashtags = text::extract_hashtags(&caption);
        Self {
            caption,
            hashtags,
            style,
            language,
            model_used,
            fallback: false,
            error: None,
        }
    }

    /// Measure the caption against a style profile
    pub fn shape(&self) -> CaptionShape {
        CaptionShape::measure(&self.caption)
    }
}

/// Measured structure of a caption text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptionShape {
    pub sentences: usize,
    pub emojis: usize,
    pub trailing_hashtags: usize,
}

impl CaptionShape {
    pub fn measure(caption: &str) -> Self {
        Self {
            sentences: text::count_sentences(caption),
            emojis: text::count_emoji(caption),
            trailing_hashtags: text::trailing_hashtag_count(caption),
        }
    }

    pub fn satisfies(&self, profile: &StyleProfile) -> bool {
        profile.sentences.contains(self.sentences)
            && profile.emojis.contains(self.emojis)
            && profile.hashtags.contains(self.trailing_hashtags)
    }
}
