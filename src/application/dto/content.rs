//! Content DTOs - Backend module/scenario shapes and their normalization
//!
//! The backend has served modules both as a bare array and wrapped in
//! `{ modules, scenarios }`, and scenarios with either snake_case or
//! camelCase keys. Everything is normalized here.

use serde::Deserialize;

use crate::domain::entities::{
    BoardLayout, BoardTransition, LayoutError, Module, ModuleTranslation, Scenario,
    ScenarioTranslation, DEFAULT_BOARD_SIZE,
};
use crate::domain::value_objects::{null_as_default, ModuleId, Translations};

#[derive(Debug, Deserialize)]
pub struct ModuleDto {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub icon: String,
    /// Scenario ids, present only on the full module listing
    #[serde(default, alias = "scenarioIds", deserialize_with = "null_as_default")]
    pub scenarios: Vec<String>,
    #[serde(default)]
    pub translations: Translations<ModuleTranslation>,
}

impl From<ModuleDto> for Module {
    fn from(dto: ModuleDto) -> Self {
        Module::new(dto.id)
            .with_icon(dto.icon)
            .with_scenarios(dto.scenarios.into_iter().map(Into::into))
            .with_translations(dto.translations)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ModuleListDto {
    Bare(Vec<ModuleDto>),
    Envelope { modules: Vec<ModuleDto> },
}

impl ModuleListDto {
    pub fn into_modules(self) -> Vec<Module> {
        let dtos = match self {
            Self::Bare(dtos) | Self::Envelope { modules: dtos } => dtos,
        };
        dtos.into_iter().map(Module::from).collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct ScenarioDto {
    pub id: String,
    #[serde(default, alias = "moduleId")]
    pub module_id: Option<String>,
    #[serde(default, alias = "correctAnswer", deserialize_with = "null_as_default")]
    pub correct_answer: String,
    #[serde(default, alias = "orderIndex")]
    pub order_index: Option<u32>,
    #[serde(default)]
    pub translations: Translations<ScenarioTranslation>,
}

impl ScenarioDto {
    /// Convert, filling a missing module id from the module it was fetched for
    pub fn into_scenario(self, fetched_for: Option<&ModuleId>) -> Scenario {
        let module_id = self
            .module_id
            .map(ModuleId::from)
            .or_else(|| fetched_for.cloned())
            .unwrap_or_else(|| ModuleId::new(""));

        let mut scenario = Scenario::new(self.id, module_id, self.correct_answer)
            .with_order(self.order_index.unwrap_or(0));
        scenario.translations = self.translations;
        scenario
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardDto {
    #[serde(default = "default_board_size")]
    pub cell_count: u32,
    #[serde(default)]
    pub transitions: Vec<BoardTransition>,
}

fn default_board_size() -> u32 {
    DEFAULT_BOARD_SIZE
}

impl TryFrom<BoardDto> for BoardLayout {
    type Error = LayoutError;

    fn try_from(dto: BoardDto) -> Result<Self, Self::Error> {
        BoardLayout::new(dto.cell_count, dto.transitions)
    }
}

/// Bundled offline content, in the same shapes the backend serves
#[derive(Debug, Deserialize)]
pub struct OfflineDatasetDto {
    pub modules: Vec<ModuleDto>,
    pub scenarios: Vec<ScenarioDto>,
    #[serde(default)]
    pub board: Option<BoardDto>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_list_accepts_both_envelopes() {
        let bare: ModuleListDto = serde_json::from_str(
            r#"[{"id": "equality", "icon": "⚖️", "scenario_count": "3",
                 "translations": {"en": {"title": "Right to Equality", "description": "Art. 14-18", "badge": "Equality Advocate"}}}]"#,
        )
        .unwrap();
        let modules = bare.into_modules();
        assert_eq!(modules.len(), 1);
        let en = modules[0].translations.resolve(&"en".into());
        assert_eq!(en.badge_name, "Equality Advocate");

        let wrapped: ModuleListDto = serde_json::from_str(
            r#"{"modules": [{"id": "freedom", "icon": null, "scenarios": ["fr_1", "fr_2"], "translations": null}],
                "scenarios": []}"#,
        )
        .unwrap();
        let modules = wrapped.into_modules();
        assert_eq!(modules[0].scenario_ids.len(), 2);
        assert!(modules[0].icon.is_empty());
        assert!(modules[0].translations.is_empty());
    }

    #[test]
    fn test_scenario_snake_case_normalized() {
        let dto: ScenarioDto = serde_json::from_str(
            r#"{"id": "general_state_1", "correct_answer": "b", "order_index": 1,
                "translations": {"en": {"concept": "Art. 12", "feedbackCorrect": "Correct",
                  "options": [{"id": "a", "text": "No"}, {"id": "b", "text": "Yes"}]}}}"#,
        )
        .unwrap();

        let scenario = dto.into_scenario(Some(&"general-definition".into()));
        assert_eq!(scenario.module_id.as_str(), "general-definition");
        assert_eq!(scenario.correct_answer.as_str(), "b");
        assert_eq!(scenario.order_index, 1);
        let en = scenario.translations.resolve(&"en".into());
        assert_eq!(en.feedback_correct, "Correct");
        assert_eq!(en.options.len(), 2);
    }

    #[test]
    fn test_scenario_camel_case_and_missing_fields() {
        let dto: ScenarioDto = serde_json::from_str(
            r#"{"id": "s9", "moduleId": "religion", "correctAnswer": "a", "orderIndex": null}"#,
        )
        .unwrap();

        let scenario = dto.into_scenario(Some(&"ignored".into()));
        assert_eq!(scenario.module_id.as_str(), "religion");
        assert_eq!(scenario.order_index, 0);
        assert!(scenario.translations.is_empty());
    }
}
