//! Caption styles and their structural contract

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CaptionError;

/// Tone of a generated caption
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptionStyle {
    Professional,
    #[default]
    Casual,
    Poetic,
    Energetic,
    Minimal,
    Storytelling,
}

impl CaptionStyle {
    pub const ALL: [CaptionStyle; 6] = [
        CaptionStyle::Professional,
        CaptionStyle::Casual,
        CaptionStyle::Poetic,
        CaptionStyle::Energetic,
        CaptionStyle::Minimal,
        CaptionStyle::Storytelling,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Professional => "professional",
            Self::Casual => "casual",
            Self::Poetic => "poetic",
            Self::Energetic => "energetic",
            Self::Minimal => "minimal",
            Self::Storytelling => "storytelling",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Professional => "Professional",
            Self::Casual => "Casual",
            Self::Poetic => "Poetic",
            Self::Energetic => "Energetic",
            Self::Minimal => "Minimal",
            Self::Storytelling => "Storytelling",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Professional => "Formal and polished",
            Self::Casual => "Friendly and relatable",
            Self::Poetic => "Artistic and lyrical",
            Self::Energetic => "High-energy and enthusiastic",
            Self::Minimal => "Short and concise",
            Self::Storytelling => "Narrative and engaging",
        }
    }

    /// Numeric shape the backend is asked to respect
    pub const fn profile(self) -> StyleProfile {
        const BODY: CountRange = CountRange::new(2, 4);
        const TAGS: CountRange = CountRange::new(10, 15);
        match self {
            Self::Professional | Self::Poetic => StyleProfile {
                sentences: BODY,
                emojis: CountRange::new(2, 3),
                hashtags: TAGS,
            },
            Self::Casual => StyleProfile {
                sentences: BODY,
                emojis: CountRange::new(4, 6),
                hashtags: TAGS,
            },
            Self::Energetic => StyleProfile {
                sentences: BODY,
                emojis: CountRange::new(6, 8),
                hashtags: TAGS,
            },
            Self::Minimal => StyleProfile {
                sentences: CountRange::new(1, 2),
                emojis: CountRange::new(0, 1),
                hashtags: CountRange::new(5, 8),
            },
            Self::Storytelling => StyleProfile {
                sentences: BODY,
                emojis: CountRange::new(3, 5),
                hashtags: TAGS,
            },
        }
    }
}

impl fmt::Display for CaptionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaptionStyle {
    type Err = CaptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|style| style.as_str() == needle)
            .ok_or_else(|| CaptionError::Validation(format!("Unknown caption style: {s}")))
    }
}

/// Inclusive count range, rendered as `min-max`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountRange {
    pub min: usize,
    pub max: usize,
}

impl CountRange {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub const fn contains(&self, value: usize) -> bool {
        value >= self.min && value <= self.max
    }
}

impl fmt::Display for CountRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Structural requirements of a caption style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleProfile {
    pub sentences: CountRange,
    pub emojis: CountRange,
    /// Length of the trailing hashtag run
    pub hashtags: CountRange,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_profile_is_short() {
        let p = CaptionStyle::Minimal.profile();
        assert_eq!(p.sentences.to_string(), "1-2");
        assert_eq!(p.emojis.to_string(), "0-1");
        assert_eq!(p.hashtags.to_string(), "5-8");
        assert!(p.hashtags.contains(5) && p.hashtags.contains(8));
        assert!(!p.hashtags.contains(9));
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Poetic".parse::<CaptionStyle>().unwrap(), CaptionStyle::Poetic);
        assert!("loud".parse::<CaptionStyle>().is_err());
        assert_eq!(CaptionStyle::default(), CaptionStyle::Casual);
    }
}
