//! Writ Quest - one constitutional-remedies question

use tracing::{debug, warn};

use crate::application::services::quiz::{AnswerFeedback, QuestionError, QuestionView};
use crate::domain::entities::{GameResult, Module, Scenario};
use crate::domain::services::writ_fallback;
use crate::domain::value_objects::{LanguageCode, OptionId};

pub const REMEDIES_MODULE_ID: &str = "constitutional-remedies";
pub const WRIT_POINTS: i64 = 10;
pub const WRIT_BADGE: &str = "Writ Champion";

fn is_remedies_module(module: &Module, language: &LanguageCode) -> bool {
    if module.id.as_str() == REMEDIES_MODULE_ID {
        return true;
    }
    let title = module.translations.resolve(language).title.to_lowercase();
    title.contains("remedy") || title.contains("writ")
}

fn mentions_writ(scenario: &Scenario, language: &LanguageCode) -> bool {
    let translation = scenario.translations.resolve(language);
    scenario.id.as_str().contains("writ")
        || translation.concept.to_lowercase().contains("writ")
        || translation.story.to_lowercase().contains("writ")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WritAnswer {
    pub feedback: AnswerFeedback,
    pub result: Option<GameResult>,
}

#[derive(Debug, Clone)]
pub struct WritQuest {
    scenario: Scenario,
    language: LanguageCode,
    from_fallback: bool,
    answered: bool,
}

impl WritQuest {
    /// Pick the writ scenario from the remedies module, else the bundled one
    pub fn from_catalog(modules: &[Module], scenarios: &[Scenario], language: LanguageCode) -> Self {
        let found = modules
            .iter()
            .find(|m| is_remedies_module(m, &language))
            .and_then(|module| {
                scenarios
                    .iter()
                    .filter(|s| s.module_id == module.id)
                    .find(|s| mentions_writ(s, &language))
            })
            .cloned();

        let from_fallback = found.is_none();
        let scenario = found.unwrap_or_else(|| {
            warn!("No writ scenario in catalog, using bundled habeas corpus question");
            writ_fallback()
        });
        debug!(scenario_id = %scenario.id, "Writ quest ready");

        Self {
            scenario,
            language,
            from_fallback,
            answered: false,
        }
    }

    pub fn question(&self) -> QuestionView {
        QuestionView::of(&self.scenario, &self.language)
    }

    pub fn set_language(&mut self, language: LanguageCode) {
        self.language = language;
    }

    pub fn is_fallback(&self) -> bool {
        self.from_fallback
    }

    pub fn answer(&mut self, answer: &OptionId) -> Result<WritAnswer, QuestionError> {
        if self.answered {
            return Err(QuestionError::AlreadyAnswered);
        }
        self.answered = true;

        let feedback = AnswerFeedback::for_answer(&self.scenario, &self.language, answer);
        let result = feedback
            .correct
            .then(|| GameResult::points(WRIT_POINTS).with_badge(WRIT_BADGE));
        Ok(WritAnswer { feedback, result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{AnswerOption, ScenarioTranslation};
    use crate::domain::services::WRIT_FALLBACK_ID;

    fn remedies_scenario(id: &str, module: &str, concept: &str) -> Scenario {
        Scenario::new(id, module, "b").with_translation(
            "en",
            ScenarioTranslation {
                concept: concept.to_string(),
                options: vec![AnswerOption::new("a", "Mandamus"), AnswerOption::new("b", "Habeas Corpus")],
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_finds_writ_scenario_by_module_title() {
        let modules = vec![Module::new("remedies-101").with_translation("en", "Right to Constitutional Remedy", "", "")];
        let scenarios = vec![
            remedies_scenario("r1", "remedies-101", "Article 32"),
            remedies_scenario("r2", "remedies-101", "Types of Writ"),
        ];

        let quest = WritQuest::from_catalog(&modules, &scenarios, "en".into());
        assert!(!quest.is_fallback());
        assert_eq!(quest.question().scenario_id.as_str(), "r2");
    }

    #[test]
    fn test_falls_back_without_writ_content() {
        let modules = vec![Module::new(REMEDIES_MODULE_ID)];
        let scenarios = vec![remedies_scenario("r1", REMEDIES_MODULE_ID, "Article 32")];

        let mut quest = WritQuest::from_catalog(&modules, &scenarios, "hi".into());
        assert!(quest.is_fallback());
        assert_eq!(quest.question().scenario_id.as_str(), WRIT_FALLBACK_ID);
        assert_eq!(quest.question().options.len(), 4);

        let answer = quest.answer(&"a".into()).unwrap();
        assert_eq!(
            answer.result,
            Some(GameResult::points(WRIT_POINTS).with_badge(WRIT_BADGE))
        );
        assert_eq!(quest.answer(&"a".into()), Err(QuestionError::AlreadyAnswered));
    }

    #[test]
    fn test_language_switch_rerenders_question() {
        let mut quest = WritQuest::from_catalog(&[], &[], "en".into());
        let english = quest.question();

        quest.set_language("hi".into());
        let hindi = quest.question();
        assert_eq!(hindi.scenario_id, english.scenario_id);
        assert_ne!(hindi.prompt, english.prompt);
        assert!(quest.answer(&"a".into()).unwrap().feedback.correct);
    }

    #[test]
    fn test_wrong_answer_earns_nothing() {
        let mut quest = WritQuest::from_catalog(&[], &[], "en".into());
        let answer = quest.answer(&"c".into()).unwrap();
        assert!(!answer.feedback.correct);
        assert!(answer.result.is_none());
    }
}
