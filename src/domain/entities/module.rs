//! Module entity - A topical grouping of scenarios

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{null_as_default, ModuleId, ScenarioId, Translations};

/// Localized module copy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleTranslation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Badge awarded on completing the module
    #[serde(default, alias = "badge", deserialize_with = "null_as_default")]
    pub badge_name: String,
}

/// A learning module, read-only within the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: ModuleId,
    /// Display glyph, opaque to the engine
    #[serde(default)]
    pub icon: String,
    /// Scenario ids in display order
    #[serde(default)]
    pub scenario_ids: Vec<ScenarioId>,
    #[serde(default)]
    pub translations: Translations<ModuleTranslation>,
}

impl Module {
    pub fn new(id: impl Into<ModuleId>) -> Self {
        Self {
            id: id.into(),
            icon: String::new(),
            scenario_ids: Vec::new(),
            translations: Translations::new(),
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_translation(
        mut self,
        language: &str,
        title: impl Into<String>,
        description: impl Into<String>,
        badge_name: impl Into<String>,
    ) -> Self {
        self.translations.insert(
            language.into(),
            ModuleTranslation {
                title: title.into(),
                description: description.into(),
                badge_name: badge_name.into(),
            },
        );
        self
    }

    pub fn with_translations(mut self, translations: Translations<ModuleTranslation>) -> Self {
        self.translations = translations;
        self
    }

    pub fn with_scenarios(mut self, scenario_ids: impl IntoIterator<Item = ScenarioId>) -> Self {
        self.scenario_ids = scenario_ids.into_iter().collect();
        self
    }
}
