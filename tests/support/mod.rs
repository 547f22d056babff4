//! Shared fixtures for integration tests: scripted backends, stores and media
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use captionist::prelude::*;
use captionist::prompts;
use captionist::store::CaptionRecord;
use serde_json::json;

/// Smallest valid PNG header, enough for MIME sniffing
pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

pub fn sample_media() -> MediaInput {
    MediaInput::new(PNG_BYTES.to_vec(), "gig.png").with_content_type("image/png")
}

pub fn jazz_analysis() -> Analysis {
    serde_json::from_value(json!({
        "detected_objects": ["saxophone", "musician", "microphone"],
        "instruments": ["saxophone", "double bass"],
        "musician_count": 2,
        "scene_type": "live_performance",
        "genre": "jazz",
        "subgenre": "bebop",
        "mood": "intimate",
        "lighting": "warm stage lights",
        "suggested_tags": ["#jazz", "#livemusic"],
        "confidence": 0.92,
        "caption_angle": "the late-night intimacy"
    }))
    .unwrap()
}

/// What a scripted backend does when called
#[derive(Clone)]
pub enum Behavior {
    /// Reply immediately
    Succeed,
    /// Sleep before replying
    Delay(Duration),
    /// Return this error
    Fail(CaptionError),
}

/// Backend replying with canned content and recording the prompts it would send
pub struct ScriptedBackend {
    provider: ProviderType,
    behavior: Behavior,
    analysis: Analysis,
    caption_text: String,
    pub prompts: Mutex<Vec<(String, String)>>,
}

impl ScriptedBackend {
    pub fn new(provider: ProviderType, behavior: Behavior) -> Self {
        Self {
            provider,
            behavior,
            analysis: jazz_analysis(),
            caption_text: "Late set magic. 🎷 #jazz #livemusic #bebop #nightlife #sax".to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_caption_text(mut self, text: &str) -> Self {
        self.caption_text = text.to_string();
        self
    }

    pub fn with_analysis(mut self, analysis: Analysis) -> Self {
        self.analysis = analysis;
        self
    }

    async fn act(&self) -> Result<(), CaptionError> {
        match &self.behavior {
            Behavior::Succeed => Ok(()),
            Behavior::Delay(delay) => {
                tokio::time::sleep(*delay).await;
                Ok(())
            }
            Behavior::Fail(err) => Err(err.clone()),
        }
    }
}

#[async_trait]
impl CaptionBackend for ScriptedBackend {
    fn provider(&self) -> ProviderType {
        self.provider
    }

    async fn analyze_image(
        &self,
        _model: LogicalModel,
        _media: &MediaInput,
    ) -> Result<Analysis, CaptionError> {
        self.act().await?;
        Ok(self.analysis.clone())
    }

    async fn generate_caption(
        &self,
        model: LogicalModel,
        analysis: &Analysis,
        request: &CaptionRequest,
    ) -> Result<CaptionResult, CaptionError> {
        self.prompts.lock().unwrap().push((
            prompts::system_prompt(request.style, request.language),
            prompts::caption_prompt(analysis, request.style, request.language, &request.context),
        ));
        self.act().await?;
        Ok(CaptionResult::from_text(
            &self.caption_text,
            request.style,
            request.language,
            Some(model.id().to_string()),
        ))
    }
}

/// Store that always rejects records
pub struct FailingStore;

#[async_trait]
impl CaptionStore for FailingStore {
    async fn save(&self, _record: CaptionRecord) -> Result<(), CaptionError> {
        Err(CaptionError::Persistence("database unavailable".into()))
    }
}

/// Orchestrator over two scripted backends
pub fn orchestrator_with(
    openai: Arc<ScriptedBackend>,
    anthropic: Arc<ScriptedBackend>,
) -> CaptionOrchestrator {
    let router = ModelRouter::builder()
        .backend(openai)
        .backend(anthropic)
        .build()
        .unwrap();
    CaptionOrchestrator::new(router)
}

pub fn succeeding(provider: ProviderType) -> Arc<ScriptedBackend> {
    Arc::new(ScriptedBackend::new(provider, Behavior::Succeed))
}
