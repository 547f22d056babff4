//! Orchestration facade
//!
//! Entry point for callers: routes each request to a backend, bounds every
//! backend call with a timeout, and turns provider-side failures into fallback
//! content. Only caller mistakes (invalid media, unsupported model) and store
//! failures reach the caller as errors.

pub mod comparison;
pub mod pipeline;

pub use comparison::{ComparisonEntry, ComparisonOutcome, ModelComparison};
pub use pipeline::{ModelsUsed, PipelineOptions, PipelineResult, SaveTarget};

use std::collections::HashSet;
use std::time::Duration;

use futures::future::join_all;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::config::{CaptionConfig, DEFAULT_CALL_TIMEOUT};
use crate::error::CaptionError;
use crate::fallback::{fallback_analysis, fallback_caption_with_error};
use crate::parser::reason;
use crate::router::ModelRouter;
use crate::store::CaptionRecord;
use crate::types::{
    Analysis, CaptionRequest, CaptionResult, LogicalModel, MediaInput, Operation,
};

/// Error text recorded for comparison slots aborted by cancellation
pub const CANCELLED: &str = "cancelled";

#[derive(Debug, Clone)]
pub struct CaptionOrchestrator {
    router: ModelRouter,
    call_timeout: Duration,
}

impl CaptionOrchestrator {
    pub fn new(router: ModelRouter) -> Self {
        Self {
            router,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Built-in backends configured from `config`
    pub fn from_config(config: CaptionConfig) -> Result<Self, CaptionError> {
        let call_timeout = config.call_timeout;
        let router = ModelRouter::from_config(config)?;
        Ok(Self::new(router).with_call_timeout(call_timeout))
    }

    /// Bound applied around each backend call
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn router(&self) -> &ModelRouter {
        &self.router
    }

    pub fn call_timeout(&self) -> Duration {
        self.call_timeout
    }

    /// Structured analysis of `media` by `model`
    pub async fn analyze(
        &self,
        media: &MediaInput,
        model: LogicalModel,
    ) -> Result<Analysis, CaptionError> {
        media.validate()?;
        let backend = self.router.resolve(model, Operation::Analyze)?;

        match tokio::time::timeout(self.call_timeout, backend.analyze_image(model, media)).await {
            Ok(Ok(analysis)) => Ok(analysis),
            Ok(Err(err)) if err.is_recoverable() => {
                tracing::warn!(model = %model, error = %err, "analysis failed, using fallback");
                Ok(fallback_analysis(reason(err)))
            }
            Ok(Err(err)) => Err(err),
            Err(_) => {
                let err = self.timeout_error(model, Operation::Analyze);
                tracing::warn!(model = %model, error = %err, "analysis timed out, using fallback");
                Ok(fallback_analysis(reason(err)))
            }
        }
    }

    /// Styled caption for `analysis` by `model`
    pub async fn generate(
        &self,
        analysis: &Analysis,
        request: &CaptionRequest,
        model: LogicalModel,
    ) -> Result<CaptionResult, CaptionError> {
        let backend = self.router.resolve(model, Operation::Generate)?;

        let call = backend.generate_caption(model, analysis, request);
        match tokio::time::timeout(self.call_timeout, call).await {
            Ok(Ok(caption)) => Ok(caption),
            Ok(Err(err)) if err.is_recoverable() => {
                tracing::warn!(model = %model, error = %err, "caption failed, using fallback");
                Ok(fallback_caption_with_error(
                    request.style,
                    request.language,
                    reason(err),
                ))
            }
            Ok(Err(err)) => Err(err),
            Err(_) => {
                let err = self.timeout_error(model, Operation::Generate);
                tracing::warn!(model = %model, error = %err, "caption timed out, using fallback");
                Ok(fallback_caption_with_error(
                    request.style,
                    request.language,
                    reason(err),
                ))
            }
        }
    }

    /// Analyze with one model, caption with another, optionally save the result
    pub async fn analyze_and_generate(
        &self,
        media: &MediaInput,
        options: &PipelineOptions,
    ) -> Result<PipelineResult, CaptionError> {
        let request_id = Uuid::new_v4();
        tracing::debug!(
            %request_id,
            analysis_model = %options.analysis_model,
            caption_model = %options.caption_model,
            "starting caption pipeline"
        );

        // Reject unsupported caption models up front
        self.router
            .resolve(options.caption_model, Operation::Generate)?;

        let analysis = self.analyze(media, options.analysis_model).await?;
        let caption = self
            .generate(&analysis, &options.request, options.caption_model)
            .await?;

        let mut saved_to_db = false;
        if let Some(target) = options.save_target() {
            let record = CaptionRecord::from_pipeline(
                target.user_id,
                media.filename(),
                &analysis,
                &caption,
                &options.request.context,
            );
            target.store.save(record).await.map_err(|err| match err {
                CaptionError::Persistence(_) => err,
                other => CaptionError::Persistence(other.to_string()),
            })?;
            saved_to_db = true;
        }

        tracing::info!(
            %request_id,
            filename = media.filename(),
            fallback = caption.fallback,
            saved_to_db,
            "caption pipeline completed"
        );

        Ok(PipelineResult {
            request_id,
            filename: media.filename().to_string(),
            analysis,
            caption,
            models_used: ModelsUsed {
                analysis: options.analysis_model,
                caption: options.caption_model,
            },
            saved_to_db,
        })
    }

    /// Analyze the same media with several models concurrently
    pub async fn compare_models(
        &self,
        media: &MediaInput,
        models: &[LogicalModel],
    ) -> ModelComparison {
        self.compare_models_with_cancel(media, models, CancellationToken::new())
            .await
    }

    /// [`compare_models`](Self::compare_models) that stops pending slots once
    /// `cancel` fires. Finished slots keep their results.
    pub async fn compare_models_with_cancel(
        &self,
        media: &MediaInput,
        models: &[LogicalModel],
        cancel: CancellationToken,
    ) -> ModelComparison {
        let mut seen = HashSet::new();
        let distinct: Vec<LogicalModel> = models
            .iter()
            .copied()
            .filter(|model| seen.insert(*model))
            .collect();

        let slots = distinct.iter().map(|&model| {
            let cancel = cancel.clone();
            async move {
                let result = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => Err(CANCELLED.to_string()),
                    result = self.analyze(media, model) => result.map_err(|err| err.to_string()),
                };
                let outcome = match result {
                    Ok(analysis) => ComparisonOutcome::Analysis(analysis),
                    Err(error) => ComparisonOutcome::Failed { error },
                };
                ComparisonEntry { model, outcome }
            }
        });
        let comparisons = join_all(slots).await;

        ModelComparison {
            filename: media.filename().to_string(),
            comparisons,
            models_compared: models.to_vec(),
        }
    }

    fn timeout_error(&self, model: LogicalModel, operation: Operation) -> CaptionError {
        CaptionError::Timeout(format!(
            "{model} did not {operation} within {}s",
            self.call_timeout.as_secs_f64()
        ))
    }
}
