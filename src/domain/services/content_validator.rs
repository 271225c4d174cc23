//! Data-quality checks over modules and scenarios
//!
//! Issues are advisory. Malformed records stay playable; the distractor
//! builder and board gates degrade around them.

use std::collections::HashSet;
use std::fmt;

use crate::domain::entities::{BoardLayout, Module, Scenario};
use crate::domain::value_objects::{LanguageCode, ModuleId, OptionId, ScenarioId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentIssue {
    ModuleMissingDefaultLanguage(ModuleId),
    ScenarioMissingDefaultLanguage(ScenarioId),
    EmptyOptions {
        scenario_id: ScenarioId,
        language: LanguageCode,
    },
    CorrectAnswerMissing {
        scenario_id: ScenarioId,
        language: LanguageCode,
        correct_answer: OptionId,
    },
    DuplicateOptionId {
        scenario_id: ScenarioId,
        language: LanguageCode,
        option_id: OptionId,
    },
    UnknownModule {
        scenario_id: ScenarioId,
        module_id: ModuleId,
    },
    UnknownGateScenario {
        from: u32,
        scenario_id: ScenarioId,
    },
}

impl fmt::Display for ContentIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModuleMissingDefaultLanguage(id) => {
                write!(f, "module {} has no default-language entry", id)
            }
            Self::ScenarioMissingDefaultLanguage(id) => {
                write!(f, "scenario {} has no default-language entry", id)
            }
            Self::EmptyOptions { scenario_id, language } => {
                write!(f, "scenario {} [{}] has no options", scenario_id, language)
            }
            Self::CorrectAnswerMissing {
                scenario_id,
                language,
                correct_answer,
            } => write!(
                f,
                "scenario {} [{}] has no option '{}' matching its correct answer",
                scenario_id, language, correct_answer
            ),
            Self::DuplicateOptionId {
                scenario_id,
                language,
                option_id,
            } => write!(
                f,
                "scenario {} [{}] repeats option id '{}'",
                scenario_id, language, option_id
            ),
            Self::UnknownModule {
                scenario_id,
                module_id,
            } => write!(f, "scenario {} belongs to unknown module {}", scenario_id, module_id),
            Self::UnknownGateScenario { from, scenario_id } => write!(
                f,
                "board transition at cell {} references unknown scenario {}",
                from, scenario_id
            ),
        }
    }
}

pub fn validate_module(module: &Module) -> Vec<ContentIssue> {
    if module.translations.contains(&LanguageCode::default_language()) {
        Vec::new()
    } else {
        vec![ContentIssue::ModuleMissingDefaultLanguage(module.id.clone())]
    }
}

/// Check options and correct answer in every present language
pub fn validate_scenario(scenario: &Scenario) -> Vec<ContentIssue> {
    let mut issues = Vec::new();
    if !scenario
        .translations
        .contains(&LanguageCode::default_language())
    {
        issues.push(ContentIssue::ScenarioMissingDefaultLanguage(scenario.id.clone()));
    }

    for (language, translation) in scenario.translations.iter() {
        if translation.options.is_empty() {
            issues.push(ContentIssue::EmptyOptions {
                scenario_id: scenario.id.clone(),
                language: language.clone(),
            });
            continue;
        }

        let mut seen = HashSet::new();
        for option in &translation.options {
            if !seen.insert(&option.id) {
                issues.push(ContentIssue::DuplicateOptionId {
                    scenario_id: scenario.id.clone(),
                    language: language.clone(),
                    option_id: option.id.clone(),
                });
            }
        }

        if translation.option(&scenario.correct_answer).is_none() {
            issues.push(ContentIssue::CorrectAnswerMissing {
                scenario_id: scenario.id.clone(),
                language: language.clone(),
                correct_answer: scenario.correct_answer.clone(),
            });
        }
    }
    issues
}

/// Validate a whole catalog, including cross references
pub fn validate_catalog(
    modules: &[Module],
    scenarios: &[Scenario],
    board: &BoardLayout,
) -> Vec<ContentIssue> {
    let module_ids: HashSet<&ModuleId> = modules.iter().map(|m| &m.id).collect();
    let scenario_ids: HashSet<&ScenarioId> = scenarios.iter().map(|s| &s.id).collect();

    let mut issues: Vec<ContentIssue> = modules.iter().flat_map(validate_module).collect();
    for scenario in scenarios {
        issues.extend(validate_scenario(scenario));
        if !module_ids.is_empty() && !module_ids.contains(&scenario.module_id) {
            issues.push(ContentIssue::UnknownModule {
                scenario_id: scenario.id.clone(),
                module_id: scenario.module_id.clone(),
            });
        }
    }
    for transition in board.transitions() {
        if let Some(scenario_id) = &transition.scenario_id {
            if !scenario_ids.contains(scenario_id) {
                issues.push(ContentIssue::UnknownGateScenario {
                    from: transition.from,
                    scenario_id: scenario_id.clone(),
                });
            }
        }
    }
    issues
}
