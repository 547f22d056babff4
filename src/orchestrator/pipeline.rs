//! Analyze-then-caption pipeline types

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::store::CaptionStore;
use crate::types::{Analysis, CaptionRequest, CaptionResult, LogicalModel};

/// Where and for whom to save the generated caption
#[derive(Clone)]
pub struct SaveTarget {
    pub store: Arc<dyn CaptionStore>,
    pub user_id: i64,
}

impl std::fmt::Debug for SaveTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaveTarget")
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}

/// Settings for [`analyze_and_generate`](super::CaptionOrchestrator::analyze_and_generate)
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub analysis_model: LogicalModel,
    pub caption_model: LogicalModel,
    pub request: CaptionRequest,
    /// Set to `false` to skip saving even when a target is present
    pub save: bool,
    pub target: Option<SaveTarget>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            analysis_model: LogicalModel::DEFAULT_ANALYSIS,
            caption_model: LogicalModel::DEFAULT_CAPTION,
            request: CaptionRequest::default(),
            save: true,
            target: None,
        }
    }
}

impl PipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_analysis_model(mut self, model: LogicalModel) -> Self {
        self.analysis_model = model;
        self
    }

    pub fn with_caption_model(mut self, model: LogicalModel) -> Self {
        self.caption_model = model;
        self
    }

    pub fn with_request(mut self, request: CaptionRequest) -> Self {
        self.request = request;
        self
    }

    /// Save the caption for `user_id` once generated
    pub fn with_store(mut self, store: Arc<dyn CaptionStore>, user_id: i64) -> Self {
        self.target = Some(SaveTarget { store, user_id });
        self
    }

    pub fn with_save(mut self, save: bool) -> Self {
        self.save = save;
        self
    }

    /// Target to save into, if saving is enabled and a target is set
    pub(crate) fn save_target(&self) -> Option<&SaveTarget> {
        self.target.as_ref().filter(|_| self.save)
    }
}

/// Models that served each step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelsUsed {
    pub analysis: LogicalModel,
    pub caption: LogicalModel,
}

/// Outcome of a full pipeline run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineResult {
    pub request_id: Uuid,
    pub filename: String,
    pub analysis: Analysis,
    pub caption: CaptionResult,
    pub models_used: ModelsUsed,
    pub saved_to_db: bool,
}
