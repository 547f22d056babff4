//! Side-by-side analysis results

use serde::{Serialize, Serializer};

use crate::types::{Analysis, LogicalModel};

/// Result slot for one model
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ComparisonOutcome {
    Analysis(Analysis),
    Failed { error: String },
}

impl ComparisonOutcome {
    pub fn analysis(&self) -> Option<&Analysis> {
        match self {
            Self::Analysis(analysis) => Some(analysis),
            Self::Failed { .. } => None,
        }
    }

    /// Error recorded for the slot (not the fallback reason inside an analysis)
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Analysis(_) => None,
            Self::Failed { error } => Some(error),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonEntry {
    pub model: LogicalModel,
    pub outcome: ComparisonOutcome,
}

/// One entry per distinct requested model, in request order. `models_compared`
/// echoes the request as given, duplicates included.
///
/// Serializes as `{ filename, comparisons: { <model id>: ... }, models_compared }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelComparison {
    pub filename: String,
    #[serde(serialize_with = "entries_as_map")]
    pub comparisons: Vec<ComparisonEntry>,
    pub models_compared: Vec<LogicalModel>,
}

impl ModelComparison {
    pub fn get(&self, model: LogicalModel) -> Option<&ComparisonOutcome> {
        self.comparisons
            .iter()
            .find(|entry| entry.model == model)
            .map(|entry| &entry.outcome)
    }

    pub fn len(&self) -> usize {
        self.comparisons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comparisons.is_empty()
    }
}

fn entries_as_map<S: Serializer>(entries: &[ComparisonEntry], s: S) -> Result<S::Ok, S::Error> {
    s.collect_map(entries.iter().map(|e| (e.model.id(), &e.outcome)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_keyed_by_model_id() {
        let comparison = ModelComparison {
            filename: "gig.jpg".into(),
            comparisons: vec![
                ComparisonEntry {
                    model: LogicalModel::ClaudeHaiku,
                    outcome: ComparisonOutcome::Analysis(Analysis::new().with_field("genre", "folk")),
                },
                ComparisonEntry {
                    model: LogicalModel::Gpt4,
                    outcome: ComparisonOutcome::Failed {
                        error: "Unsupported model: gpt-4 cannot be used to analyze".into(),
                    },
                },
            ],
            models_compared: vec![LogicalModel::ClaudeHaiku, LogicalModel::Gpt4],
        };
        let value = serde_json::to_value(&comparison).unwrap();
        assert_eq!(value["filename"], "gig.jpg");
        assert_eq!(value["comparisons"]["claude-3-5-haiku-20241022"]["genre"], "folk");
        assert!(
            value["comparisons"]["gpt-4"]["error"]
                .as_str()
                .unwrap()
                .starts_with("Unsupported model")
        );
        assert_eq!(
            value["models_compared"],
            serde_json::json!(["claude-3-5-haiku-20241022", "gpt-4"])
        );
        assert!(comparison.get(LogicalModel::Gpt4).unwrap().error().is_some());
        assert!(comparison.get(LogicalModel::ClaudeSonnet).is_none());
    }
}
