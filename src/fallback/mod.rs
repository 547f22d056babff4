//! Deterministic offline substitutes
//!
//! Used whenever a backend call fails or its reply cannot be decoded. Nothing
//! here touches the network or can fail.

use serde_json::json;

use crate::types::analysis::keys;
use crate::types::{Analysis, CaptionResult, CaptionStyle, Language};

/// Neutral analysis of a generic music scene, carrying `reason` as its error
pub fn fallback_analysis(reason: impl Into<String>) -> Analysis {
    Analysis::new()
        .with_field(keys::DETECTED_OBJECTS, json!(["musician", "instrument"]))
        .with_field(keys::INSTRUMENTS, json!(["unknown"]))
        .with_field(keys::MUSICIAN_COUNT, 1)
        .with_field(keys::SCENE_TYPE, "music")
        .with_field(keys::GENRE, "music")
        .with_field(keys::SUBGENRE, "")
        .with_field(keys::MOOD, "creative")
        .with_field(keys::LIGHTING, "stage lighting")
        .with_field(keys::DOMINANT_COLORS, json!(["#1a1a2e", "#eebf3f"]))
        .with_field(keys::COMPOSITION_QUALITY, "good")
        .with_field(keys::SUGGESTED_FILTERS, json!(["Clarendon", "Juno"]))
        .with_field(
            keys::SUGGESTED_TAGS,
            json!(["#music", "#musician", "#livemusic"]),
        )
        .with_field(keys::CONFIDENCE, 0.5)
        .with_field(keys::CAPTION_ANGLE, "general music vibe")
        .with_field(keys::DESCRIPTION, "Music performance")
        .with_field(keys::ERROR, reason.into())
}

/// Canned caption for a language. The style is echoed back but does not
/// change the text.
pub fn fallback_caption(style: CaptionStyle, language: Language) -> CaptionResult {
    let mut result = CaptionResult::from_text(caption_template(language), style, language, None);
    result.fallback = true;
    result
}

/// Canned caption carrying the reason the real backend was not used
pub fn fallback_caption_with_error(
    style: CaptionStyle,
    language: Language,
    reason: impl Into<String>,
) -> CaptionResult {
    let mut result = fallback_caption(style, language);
    result.error = Some(reason.into());
    result
}

/// Canned caption for a raw language code; unknown codes get the French text
pub fn fallback_caption_for_code(style: CaptionStyle, code: &str) -> CaptionResult {
    let language = code.parse().unwrap_or(Language::French);
    fallback_caption(style, language)
}

fn caption_template(language: Language) -> &'static str {
    match language {
        Language::French => {
            "🎵 Session musicale intense ! L'énergie était incroyable. 🎸✨\n\n#music #livemusic #musician #concert #musiclife"
        }
        Language::English => {
            "🎵 Amazing music session! The energy was incredible. 🎸✨\n\n#music #livemusic #musician #concert #musiclife"
        }
        Language::Spanish => {
            "🎵 ¡Sesión musical increíble! La energía fue espectacular. 🎸✨\n\n#musica #musicaenvivo #musico #concierto #vidamusical"
        }
        Language::German => {
            "🎵 Fantastische Musik-Session! Die Energie war unglaublich. 🎸✨\n\n#musik #livemusik #musiker #konzert #musikleben"
        }
        Language::Italian => {
            "🎵 Sessione musicale fantastica! L'energia era incredibile. 🎸✨\n\n#musica #musicadalvivo #musicista #concerto #vitamusicale"
        }
    }
}
