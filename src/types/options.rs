//! Static listing of selectable models, styles and languages

use serde::Serialize;

use super::{CaptionStyle, Language, LogicalModel};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelOption {
    pub value: LogicalModel,
    pub name: &'static str,
    pub provider: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelOptions {
    pub analysis: Vec<ModelOption>,
    pub caption: Vec<ModelOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleOption {
    pub value: CaptionStyle,
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageOption {
    pub value: Language,
    pub name: &'static str,
    pub flag: &'static str,
}

/// Everything a client can pick from, with display metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailableOptions {
    pub models: ModelOptions,
    pub styles: Vec<StyleOption>,
    pub languages: Vec<LanguageOption>,
}

/// Build the options table. Derived from the enums, so it cannot drift from dispatch.
pub fn available_options() -> AvailableOptions {
    let model_option = |model: LogicalModel, description: &'static str| ModelOption {
        value: model,
        name: model.info().name,
        provider: model.provider().label(),
        description,
    };

    let analysis = LogicalModel::ALL
        .into_iter()
        .filter_map(|m| m.info().analysis_description.map(|d| model_option(m, d)))
        .collect();
    let caption = LogicalModel::ALL
        .into_iter()
        .filter_map(|m| m.info().caption_description.map(|d| model_option(m, d)))
        .collect();

    AvailableOptions {
        models: ModelOptions { analysis, caption },
        styles: CaptionStyle::ALL
            .into_iter()
            .map(|style| StyleOption {
                value: style,
                name: style.display_name(),
                description: style.description(),
            })
            .collect(),
        languages: Language::ALL
            .into_iter()
            .map(|lang| LanguageOption {
                value: lang,
                name: lang.native_name(),
                flag: lang.flag(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Operation;

    #[test]
    fn listed_models_support_their_operation() {
        let options = available_options();
        assert_eq!(options.models.analysis.len(), 3);
        assert_eq!(options.models.caption.len(), 3);
        assert!(
            options
                .models
                .analysis
                .iter()
                .all(|o| o.value.supports(Operation::Analyze))
        );
        assert!(
            options
                .models
                .caption
                .iter()
                .all(|o| o.value.supports(Operation::Generate))
        );
    }

    #[test]
    fn serializes_wire_values() {
        let json = serde_json::to_value(available_options()).unwrap();
        assert_eq!(json["models"]["analysis"][0]["value"], "gpt-4-vision-preview");
        assert_eq!(json["models"]["analysis"][0]["provider"], "OpenAI");
        assert_eq!(json["styles"].as_array().unwrap().len(), 6);
        assert_eq!(json["languages"][0]["value"], "fr");
        assert_eq!(json["languages"][0]["name"], "Français");
    }
}
