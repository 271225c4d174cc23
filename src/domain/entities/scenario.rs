//! Scenario entity - A single localized quiz item

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{
    null_as_default, LanguageCode, ModuleId, OptionId, ScenarioId, Translations,
};

/// One selectable answer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: OptionId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
}

impl AnswerOption {
    pub fn new(id: impl Into<OptionId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Localized scenario copy and its options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioTranslation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub concept: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub explanation: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub story: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub feedback_correct: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub feedback_incorrect: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: Vec<AnswerOption>,
}

impl ScenarioTranslation {
    pub fn option(&self, id: &OptionId) -> Option<&AnswerOption> {
        self.options.iter().find(|option| option.id == *id)
    }

    /// Question text shown to the player; the story if present, else the concept
    pub fn prompt(&self) -> &str {
        if self.story.is_empty() {
            &self.concept
        } else {
            &self.story
        }
    }
}

/// A quiz item, read-only within the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: ScenarioId,
    pub module_id: ModuleId,
    /// Tie-break and display order within the module
    #[serde(default)]
    pub order_index: u32,
    pub correct_answer: OptionId,
    #[serde(default)]
    pub translations: Translations<ScenarioTranslation>,
}

impl Scenario {
    pub fn new(
        id: impl Into<ScenarioId>,
        module_id: impl Into<ModuleId>,
        correct_answer: impl Into<OptionId>,
    ) -> Self {
        Self {
            id: id.into(),
            module_id: module_id.into(),
            order_index: 0,
            correct_answer: correct_answer.into(),
            translations: Translations::new(),
        }
    }

    pub fn with_order(mut self, order_index: u32) -> Self {
        self.order_index = order_index;
        self
    }

    pub fn with_translation(mut self, language: &str, translation: ScenarioTranslation) -> Self {
        self.translations.insert(language.into(), translation);
        self
    }

    pub fn is_correct(&self, answer: &OptionId) -> bool {
        self.correct_answer == *answer
    }

    /// Options for `language`, after fallback resolution
    pub fn options_for(&self, language: &LanguageCode) -> Vec<AnswerOption> {
        self.translations.resolve(language).options.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_tolerates_nulls() {
        let translation: ScenarioTranslation = serde_json::from_str(
            r#"{"concept": "Art. 12", "story": null, "options": null}"#,
        )
        .unwrap();

        assert_eq!(translation.concept, "Art. 12");
        assert!(translation.story.is_empty());
        assert!(translation.options.is_empty());
        assert_eq!(translation.prompt(), "Art. 12");
    }

    #[test]
    fn test_options_for_falls_back_to_english() {
        let scenario = Scenario::new("s1", "equality", "a").with_translation(
            "en",
            ScenarioTranslation {
                options: vec![AnswerOption::new("a", "Article 14")],
                ..Default::default()
            },
        );

        let options = scenario.options_for(&"hi".into());
        assert_eq!(options, vec![AnswerOption::new("a", "Article 14")]);
        assert!(scenario.is_correct(&"a".into()));
    }
}
