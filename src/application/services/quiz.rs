//! Shared plumbing for the quiz mini-games

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::domain::entities::{AnswerOption, Scenario};
use crate::domain::value_objects::{LanguageCode, OptionId, ScenarioId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionError {
    #[error("No question is being asked")]
    NoQuestion,
    #[error("Question already answered")]
    AlreadyAnswered,
    #[error("Answer the question before moving on")]
    NotAnswered,
    #[error("Nothing left to answer")]
    Finished,
}

/// RNG for one session; seeded when reproducible play is configured
pub fn session_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// A scenario rendered in one language, ready to show
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub scenario_id: ScenarioId,
    pub concept: String,
    pub prompt: String,
    pub options: Vec<AnswerOption>,
}

impl QuestionView {
    /// View with the scenario's own options
    pub fn of(scenario: &Scenario, language: &LanguageCode) -> Self {
        let options = scenario.options_for(language);
        Self::with_options(scenario, language, options)
    }

    pub fn with_options(scenario: &Scenario, language: &LanguageCode, options: Vec<AnswerOption>) -> Self {
        let translation = scenario.translations.resolve(language);
        Self {
            scenario_id: scenario.id.clone(),
            concept: translation.concept.clone(),
            prompt: translation.prompt().to_string(),
            options,
        }
    }

    pub fn option(&self, id: &OptionId) -> Option<&AnswerOption> {
        self.options.iter().find(|option| option.id == *id)
    }
}

/// Correctness plus the authored feedback copy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerFeedback {
    pub correct: bool,
    pub correct_answer: OptionId,
    pub message: String,
    pub explanation: String,
}

impl AnswerFeedback {
    pub fn for_answer(scenario: &Scenario, language: &LanguageCode, answer: &OptionId) -> Self {
        let correct = scenario.is_correct(answer);
        let translation = scenario.translations.resolve(language);
        let message = if correct {
            translation.feedback_correct.clone()
        } else {
            translation.feedback_incorrect.clone()
        };
        Self {
            correct,
            correct_answer: scenario.correct_answer.clone(),
            message,
            explanation: translation.explanation.clone(),
        }
    }
}
