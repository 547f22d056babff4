//! Prompt builder
//!
//! Backend-agnostic instruction text. Every adapter sends the same analysis
//! prompt and assembles caption prompts through [`caption_prompt`] and
//! [`system_prompt`], so style and language rules live in one place.

use crate::types::{Analysis, CaptionContext, CaptionStyle, Language};

const ANALYSIS_PROMPT: &str = r##"Analyze this music-related image in detail and provide:

1. **Instruments detected**: List all visible musical instruments
2. **Musicians count**: Number of people visible
3. **Scene type**: (studio, live_performance, rehearsal, outdoor_festival, street_performance, recording_session)
4. **Musical genre/style**: Identify the genre (jazz, rock, classical, hip-hop, electronic, folk, world, fusion, etc.)
5. **Mood/Atmosphere**: Describe the overall feeling (energetic, intimate, melancholic, joyful, intense, relaxed)
6. **Lighting & Colors**: Describe dominant colors and lighting type (warm, cool, dramatic, natural, stage lights)
7. **Composition quality**: Rate the photo quality and composition
8. **Suggested Instagram filters**: Based on colors and mood (Clarendon, Gingham, Juno, Lark, etc.)
9. **Hashtags**: 15 highly relevant and trending hashtags
10. **Best caption angle**: What aspect to emphasize (energy, intimacy, technique, venue, etc.)

Return ONLY valid JSON in this exact format:
{
    "detected_objects": ["instrument1", "musician", "equipment"],
    "instruments": ["guitar", "drums"],
    "musician_count": 2,
    "scene_type": "live_performance",
    "genre": "jazz",
    "subgenre": "bebop",
    "mood": "energetic and vibrant",
    "lighting": "warm stage lights with dramatic shadows",
    "dominant_colors": ["#1a1a2e", "#eebf3f", "#c73e1d"],
    "composition_quality": "professional",
    "suggested_filters": ["Clarendon", "Juno", "Lark"],
    "suggested_tags": ["#jazz", "#livemusic", "#concert", "#bebop", "#jazzmusician", "#musicphotography", "#concertphotography", "#liveperformance", "#jazzclub", "#musiclife", "#jazznight", "#instamusic", "#musician", "#musiclover", "#jazzlove"],
    "confidence": 0.95,
    "caption_angle": "emphasize the energy and crowd engagement",
    "description": "Brief description of the scene"
}"##;

const SYSTEM_BASE: &str =
    "You are an expert social media content creator specializing in music and Instagram captions.";

const NO_CONTEXT: &str = "No additional context";

/// Analysis fields that fall back to a neutral phrase when missing or empty
mod defaults {
    pub const GENRE: &str = "music";
    pub const SCENE: &str = "music performance";
    pub const MOOD: &str = "creative";
    pub const INSTRUMENTS: &str = "instruments";
    pub const LIGHTING: &str = "stage lighting";
    pub const CAPTION_ANGLE: &str = "general music vibe";
}

/// Vision prompt requesting the ten facets as strict JSON
pub fn analysis_prompt() -> &'static str {
    ANALYSIS_PROMPT
}

/// User prompt for caption generation
pub fn caption_prompt(
    analysis: &Analysis,
    style: CaptionStyle,
    language: Language,
    context: &CaptionContext,
) -> String {
    let lang = language.display_name();
    let genre = match non_empty(analysis.subgenre()) {
        Some(sub) => format!("{} ({sub})", or_default(analysis.genre(), defaults::GENRE)),
        None => or_default(analysis.genre(), defaults::GENRE).to_string(),
    };
    let instruments = analysis.instruments();
    let instruments = if instruments.is_empty() {
        defaults::INSTRUMENTS.to_string()
    } else {
        instruments.join(", ")
    };
    let profile = style.profile();

    format!(
        "Generate an Instagram caption in {lang} for this music photo.

**Image Analysis:**
- Genre: {genre}
- Scene: {scene}
- Mood: {mood}
- Instruments: {instruments}
- Lighting: {lighting}
- Caption Angle: {angle}

**Context:**
{context}

**Style Requirements:**
{requirements}

**Format:**
- {sentences} sentences in {lang}
- {emojis} emojis suited to the style
- End with {hashtags} relevant hashtags
- Optimized for Instagram engagement

Return ONLY the caption text, nothing else.",
        scene = or_default(analysis.scene_type(), defaults::SCENE),
        mood = or_default(analysis.mood(), defaults::MOOD),
        lighting = or_default(analysis.lighting(), defaults::LIGHTING),
        angle = or_default(analysis.caption_angle(), defaults::CAPTION_ANGLE),
        context = context_block(context),
        requirements = style_requirements(style),
        sentences = profile.sentences,
        emojis = profile.emojis,
        hashtags = profile.hashtags,
    )
}

/// System prompt: persona, style tone and a hard language constraint
pub fn system_prompt(style: CaptionStyle, language: Language) -> String {
    let lang = language.display_name();
    format!(
        "{SYSTEM_BASE} {tone} Always write in perfect, native-level {lang}. Respond only in {lang}.",
        tone = style_tone(style)
    )
}

/// Present context lines joined by newlines, or a placeholder
pub fn context_block(context: &CaptionContext) -> String {
    let mut lines = Vec::new();
    if let Some(musicians) = &context.musicians
        && !musicians.is_empty()
    {
        lines.push(format!("Musicians: {}", musicians.join(", ")));
    }
    if let Some(venue) = non_empty(context.venue.as_deref()) {
        lines.push(format!("Venue: {venue}"));
    }
    if let Some(extra) = non_empty(context.custom_context.as_deref()) {
        lines.push(format!("Additional context: {extra}"));
    }
    if lines.is_empty() {
        NO_CONTEXT.to_string()
    } else {
        lines.join("\n")
    }
}

/// Bullet list of tone and wording rules for a style
pub fn style_requirements(style: CaptionStyle) -> &'static str {
    match style {
        CaptionStyle::Professional => {
            "- Professional and polished tone
- Focus on technical aspects and artistry
- Sophisticated vocabulary
- Minimal emojis (max 2-3, professional ones only)
- Industry-relevant hashtags"
        }
        CaptionStyle::Casual => {
            "- Friendly and conversational tone
- Relatable and authentic voice
- Moderate emoji use (4-6)
- Mix of popular and niche hashtags
- Feels like talking to a friend"
        }
        CaptionStyle::Poetic => {
            "- Artistic and lyrical language
- Metaphors and imagery
- Evocative descriptions
- Selective emoji use (2-3, symbolic)
- Poetic/artistic hashtags"
        }
        CaptionStyle::Energetic => {
            "- High energy and enthusiasm
- Exclamation points and dynamic language
- Generous emoji use (6-8)
- Trending and viral hashtags
- Captures excitement and momentum"
        }
        CaptionStyle::Minimal => {
            "- Short and concise (1-2 sentences max)
- No or very minimal emojis (0-1)
- Simple, direct language
- Essential hashtags only (5-8)
- Let the image speak"
        }
        CaptionStyle::Storytelling => {
            "- Narrative structure with beginning/middle/end
- Sets the scene and builds atmosphere
- Personal and engaging
- Strategic emoji use (3-5)
- Story-focused hashtags"
        }
    }
}

fn style_tone(style: CaptionStyle) -> &'static str {
    match style {
        CaptionStyle::Professional => {
            "You write professional, polished content for established musicians and industry professionals."
        }
        CaptionStyle::Casual => {
            "You write friendly, authentic captions that feel personal and relatable."
        }
        CaptionStyle::Poetic => {
            "You write artistic, lyrical captions with beautiful imagery and metaphors."
        }
        CaptionStyle::Energetic => {
            "You write high-energy, enthusiastic captions that capture excitement and momentum."
        }
        CaptionStyle::Minimal => {
            "You write minimal, concise captions that are direct and impactful."
        }
        CaptionStyle::Storytelling => {
            "You write narrative captions that tell compelling stories and set the scene."
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn or_default<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    non_empty(value).unwrap_or(default)
}
