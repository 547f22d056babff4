//! Canonical analysis result
//!
//! An [`Analysis`] is the JSON object a backend returned (or the fallback shape).
//! Keys are not validated: absent or mistyped fields read as unknown, and any
//! provider-specific extras are kept untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Well-known analysis keys
pub mod keys {
    pub const DETECTED_OBJECTS: &str = "detected_objects";
    pub const INSTRUMENTS: &str = "instruments";
    pub const MUSICIAN_COUNT: &str = "musician_count";
    pub const SCENE_TYPE: &str = "scene_type";
    pub const GENRE: &str = "genre";
    pub const SUBGENRE: &str = "subgenre";
    pub const MOOD: &str = "mood";
    pub const LIGHTING: &str = "lighting";
    pub const DOMINANT_COLORS: &str = "dominant_colors";
    pub const COMPOSITION_QUALITY: &str = "composition_quality";
    pub const SUGGESTED_FILTERS: &str = "suggested_filters";
    pub const SUGGESTED_TAGS: &str = "suggested_tags";
    pub const CONFIDENCE: &str = "confidence";
    pub const CAPTION_ANGLE: &str = "caption_angle";
    pub const DESCRIPTION: &str = "description";
    pub const ERROR: &str = "error";
}

/// Structured visual analysis of a media upload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Analysis(Map<String, Value>);

impl Analysis {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Builder-style insert
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    fn string_list(&self, key: &str) -> Vec<String> {
        self.0
            .get(key)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn detected_objects(&self) -> Vec<String> {
        self.string_list(keys::DETECTED_OBJECTS)
    }

    pub fn instruments(&self) -> Vec<String> {
        self.string_list(keys::INSTRUMENTS)
    }

    pub fn musician_count(&self) -> Option<u64> {
        self.0.get(keys::MUSICIAN_COUNT).and_then(Value::as_u64)
    }

    pub fn scene_type(&self) -> Option<&str> {
        self.str_field(keys::SCENE_TYPE)
    }

    pub fn genre(&self) -> Option<&str> {
        self.str_field(keys::GENRE)
    }

    pub fn subgenre(&self) -> Option<&str> {
        self.str_field(keys::SUBGENRE)
    }

    pub fn mood(&self) -> Option<&str> {
        self.str_field(keys::MOOD)
    }

    pub fn lighting(&self) -> Option<&str> {
        self.str_field(keys::LIGHTING)
    }

    pub fn dominant_colors(&self) -> Vec<String> {
        self.string_list(keys::DOMINANT_COLORS)
    }

    pub fn composition_quality(&self) -> Option<&str> {
        self.str_field(keys::COMPOSITION_QUALITY)
    }

    pub fn suggested_filters(&self) -> Vec<String> {
        self.string_list(keys::SUGGESTED_FILTERS)
    }

    pub fn suggested_tags(&self) -> Vec<String> {
        self.string_list(keys::SUGGESTED_TAGS)
    }

    pub fn confidence(&self) -> Option<f64> {
        self.0.get(keys::CONFIDENCE).and_then(Value::as_f64)
    }

    pub fn caption_angle(&self) -> Option<&str> {
        self.str_field(keys::CAPTION_ANGLE)
    }

    pub fn description(&self) -> Option<&str> {
        self.str_field(keys::DESCRIPTION)
    }

    /// Degradation reason, present on fallback analyses
    pub fn error(&self) -> Option<&str> {
        self.str_field(keys::ERROR)
    }
}

impl From<Map<String, Value>> for Analysis {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Analysis> for Value {
    fn from(analysis: Analysis) -> Self {
        Value::Object(analysis.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accessors_tolerate_missing_and_mistyped_fields() {
        let Value::Object(map) = json!({
            "instruments": ["guitar", 3, "drums"],
            "musician_count": "two",
            "genre": "jazz",
            "confidence": 0.8,
            "vendor_extra": {"k": true}
        }) else {
            unreachable!()
        };
        let analysis = Analysis::from_map(map);

        assert_eq!(analysis.instruments(), vec!["guitar", "drums"]);
        assert_eq!(analysis.musician_count(), None);
        assert_eq!(analysis.genre(), Some("jazz"));
        assert_eq!(analysis.mood(), None);
        assert!(analysis.detected_objects().is_empty());
        assert_eq!(analysis.confidence(), Some(0.8));
        assert!(analysis.contains_key("vendor_extra"));
        assert_eq!(analysis.error(), None);
    }

    #[test]
    fn serializes_as_plain_object() {
        let analysis = Analysis::new().with_field(keys::ERROR, "boom");
        assert_eq!(serde_json::to_value(&analysis).unwrap(), json!({"error": "boom"}));
    }
}
