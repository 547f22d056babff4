//! Output languages

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CaptionError;

/// Caption output language, serialized as its ISO 639-1 code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "en")]
    English,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "de")]
    German,
    #[serde(rename = "it")]
    Italian,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::French,
        Language::English,
        Language::Spanish,
        Language::German,
        Language::Italian,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            Self::French => "fr",
            Self::English => "en",
            Self::Spanish => "es",
            Self::German => "de",
            Self::Italian => "it",
        }
    }

    /// English name, used inside prompts
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::French => "French",
            Self::English => "English",
            Self::Spanish => "Spanish",
            Self::German => "German",
            Self::Italian => "Italian",
        }
    }

    pub const fn native_name(self) -> &'static str {
        match self {
            Self::French => "Français",
            Self::English => "English",
            Self::Spanish => "Español",
            Self::German => "Deutsch",
            Self::Italian => "Italiano",
        }
    }

    pub const fn flag(self) -> &'static str {
        match self {
            Self::French => "🇫🇷",
            Self::English => "🇬🇧",
            Self::Spanish => "🇪🇸",
            Self::German => "🇩🇪",
            Self::Italian => "🇮🇹",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = CaptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|lang| lang.code() == needle)
            .ok_or_else(|| CaptionError::Validation(format!("Unknown language: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_parse_and_serialize() {
        assert_eq!("EN".parse::<Language>().unwrap(), Language::English);
        assert!("pt".parse::<Language>().is_err());
        assert_eq!(serde_json::to_string(&Language::German).unwrap(), "\"de\"");
        assert_eq!(Language::Spanish.display_name(), "Spanish");
    }
}
