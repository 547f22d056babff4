//! Persistence contract
//!
//! The orchestrator never owns a database. After a pipeline run it hands a
//! [`CaptionRecord`] to whatever [`CaptionStore`] the caller supplied.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::CaptionError;
use crate::types::{Analysis, CaptionContext, CaptionResult, CaptionStyle, Language};

/// One saved caption
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionRecord {
    pub id: Uuid,
    pub user_id: i64,
    pub caption_text: String,
    pub media_filename: String,
    pub detected_objects: Vec<String>,
    pub suggested_tags: Vec<String>,
    pub confidence: Option<f64>,
    pub musicians: Option<Vec<String>>,
    pub venue: Option<String>,
    pub style: CaptionStyle,
    pub language: Language,
    pub created_at: DateTime<Utc>,
}

impl CaptionRecord {
    /// Assemble a record from the pieces of a finished pipeline run
    pub fn from_pipeline(
        user_id: i64,
        filename: &str,
        analysis: &Analysis,
        caption: &CaptionResult,
        context: &CaptionContext,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            caption_text: caption.caption.clone(),
            media_filename: filename.to_string(),
            detected_objects: analysis.detected_objects(),
            suggested_tags: analysis.suggested_tags(),
            confidence: analysis.confidence(),
            musicians: context.musicians.clone().filter(|m| !m.is_empty()),
            venue: context.venue.clone(),
            style: caption.style,
            language: caption.language,
            created_at: Utc::now(),
        }
    }
}

/// Sink for generated captions
#[async_trait]
pub trait CaptionStore: Send + Sync {
    /// Persist a record. Failures should be reported as `CaptionError::Persistence`.
    async fn save(&self, record: CaptionRecord) -> Result<(), CaptionError>;
}

/// Process-local store, mostly useful for embedding and tests
#[derive(Debug, Clone, Default)]
pub struct InMemoryCaptionStore {
    records: Arc<RwLock<Vec<CaptionRecord>>>,
}

impl InMemoryCaptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn records(&self) -> Vec<CaptionRecord> {
        self.records.read().await.clone()
    }

    /// Records saved for one user, oldest first
    pub async fn records_for_user(&self, user_id: i64) -> Vec<CaptionRecord> {
        self.records
            .read()
            .await
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl CaptionStore for InMemoryCaptionStore {
    async fn save(&self, record: CaptionRecord) -> Result<(), CaptionError> {
        self.records.write().await.push(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::{fallback_analysis, fallback_caption};

    #[tokio::test]
    async fn record_copies_pipeline_fields() {
        let analysis = fallback_analysis("offline");
        let caption = fallback_caption(CaptionStyle::Poetic, Language::Italian);
        let context = CaptionContext::new()
            .with_musicians(["Ana"])
            .with_venue("Sunside");
        let record = CaptionRecord::from_pipeline(7, "gig.jpg", &analysis, &caption, &context);

        assert_eq!(record.user_id, 7);
        assert_eq!(record.media_filename, "gig.jpg");
        assert_eq!(record.caption_text, caption.caption);
        assert_eq!(record.detected_objects, vec!["musician", "instrument"]);
        assert_eq!(record.confidence, Some(0.5));
        assert_eq!(record.style, CaptionStyle::Poetic);
        assert_eq!(record.musicians, Some(vec!["Ana".to_string()]));
        assert_eq!(record.venue.as_deref(), Some("Sunside"));

        let store = InMemoryCaptionStore::new();
        store.save(record.clone()).await.unwrap();
        store
            .save(CaptionRecord {
                user_id: 8,
                ..record
            })
            .await
            .unwrap();
        assert_eq!(store.len().await, 2);
        assert_eq!(store.records_for_user(7).await.len(), 1);
    }
}
