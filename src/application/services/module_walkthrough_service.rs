//! Module Walkthrough - learn a module one scenario at a time

use tracing::info;

use crate::application::services::quiz::{AnswerFeedback, QuestionError, QuestionView};
use crate::domain::entities::{GameResult, Module, ProgressProfile, Scenario};
use crate::domain::services::{learned_scenario, module_completion};
use crate::domain::value_objects::{LanguageCode, OptionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonAnswer {
    pub feedback: AnswerFeedback,
    /// Points and concept for a correct answer
    pub result: Option<GameResult>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonStep {
    Next { index: usize },
    /// Module done; `result` is `None` when the module was already completed
    Completed { result: Option<GameResult> },
}

#[derive(Debug, Clone)]
pub struct ModuleWalkthrough {
    module: Module,
    scenarios: Vec<Scenario>,
    language: LanguageCode,
    index: usize,
    answered: bool,
    completed: bool,
}

impl ModuleWalkthrough {
    /// `scenarios` in display order
    pub fn new(module: Module, scenarios: Vec<Scenario>, language: LanguageCode) -> Self {
        Self {
            module,
            scenarios,
            language,
            index: 0,
            answered: false,
            completed: false,
        }
    }

    pub fn set_language(&mut self, language: LanguageCode) {
        self.language = language;
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    /// (current, total), one-based for display
    pub fn position(&self) -> (usize, usize) {
        ((self.index + 1).min(self.scenarios.len()), self.scenarios.len())
    }

    pub fn current(&self) -> Option<QuestionView> {
        if self.completed {
            return None;
        }
        self.scenarios
            .get(self.index)
            .map(|s| QuestionView::of(s, &self.language))
    }

    pub fn answer(&mut self, answer: &OptionId) -> Result<LessonAnswer, QuestionError> {
        if self.completed {
            return Err(QuestionError::Finished);
        }
        let scenario = self.scenarios.get(self.index).ok_or(QuestionError::NoQuestion)?;
        if self.answered {
            return Err(QuestionError::AlreadyAnswered);
        }
        self.answered = true;

        let feedback = AnswerFeedback::for_answer(scenario, &self.language, answer);
        let result = feedback
            .correct
            .then(|| learned_scenario(scenario, &self.language));
        Ok(LessonAnswer { feedback, result })
    }

    /// Go to the next scenario, or finish the module against `profile`
    pub fn advance(&mut self, profile: &ProgressProfile) -> Result<LessonStep, QuestionError> {
        if self.completed {
            return Err(QuestionError::Finished);
        }
        if self.index < self.scenarios.len() && !self.answered {
            return Err(QuestionError::NotAnswered);
        }

        if self.index + 1 < self.scenarios.len() {
            self.index += 1;
            self.answered = false;
            return Ok(LessonStep::Next { index: self.index });
        }

        self.completed = true;
        let result = module_completion(profile, &self.module, &self.language);
        info!(
            module_id = %self.module.id,
            rewarded = result.is_some(),
            "Module walkthrough completed"
        );
        Ok(LessonStep::Completed { result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{AnswerOption, ScenarioTranslation};
    use crate::domain::services::{merge, MODULE_COMPLETION_BONUS};

    fn module() -> Module {
        Module::new("equality").with_translation("en", "Right to Equality", "Articles 14-18", "Equality Advocate")
    }

    fn scenario(id: &str, concept: &str) -> Scenario {
        Scenario::new(id, "equality", "a").with_translation(
            "en",
            ScenarioTranslation {
                concept: concept.to_string(),
                options: vec![AnswerOption::new("a", "yes"), AnswerOption::new("b", "no")],
                ..Default::default()
            },
        )
    }

    fn walkthrough() -> ModuleWalkthrough {
        ModuleWalkthrough::new(
            module(),
            vec![scenario("s1", "Art. 14"), scenario("s2", "Art. 17")],
            "en".into(),
        )
    }

    #[test]
    fn test_full_walkthrough_rewards_learning_and_completion() {
        let mut lesson = walkthrough();
        let mut profile = ProgressProfile::default();

        let first = lesson.answer(&"a".into()).unwrap();
        profile = merge(&profile, &first.result.unwrap());
        assert_eq!(lesson.advance(&profile), Ok(LessonStep::Next { index: 1 }));

        let second = lesson.answer(&"b".into()).unwrap();
        assert!(second.result.is_none());

        let LessonStep::Completed { result: Some(result) } = lesson.advance(&profile).unwrap() else {
            panic!("expected a completion reward");
        };
        profile = merge(&profile, &result);

        assert_eq!(profile.points, 10 + MODULE_COMPLETION_BONUS);
        assert!(profile.has_badge("Equality Advocate"));
        assert!(profile.has_completed(&"equality".into()));
        assert!(profile.learned_concepts.contains("Art. 14"));
        assert!(lesson.current().is_none());
        assert_eq!(lesson.answer(&"a".into()), Err(QuestionError::Finished));
    }

    #[test]
    fn test_repeat_completion_pays_nothing() {
        let mut profile = ProgressProfile::default();
        profile.badges.insert("Equality Advocate".to_string());
        let mut lesson = ModuleWalkthrough::new(module(), vec![scenario("s1", "Art. 14")], "en".into());

        lesson.answer(&"a".into()).unwrap();
        assert_eq!(lesson.advance(&profile), Ok(LessonStep::Completed { result: None }));
    }

    #[test]
    fn test_language_switch_applies_to_current_step() {
        let bilingual = scenario("s1", "Art. 14").with_translation(
            "hi",
            ScenarioTranslation {
                concept: "अनुच्छेद 14".to_string(),
                options: vec![AnswerOption::new("a", "हाँ"), AnswerOption::new("b", "नहीं")],
                ..Default::default()
            },
        );
        let mut lesson = ModuleWalkthrough::new(module(), vec![bilingual], "en".into());
        assert_eq!(lesson.current().unwrap().concept, "Art. 14");

        lesson.set_language("hi".into());
        assert_eq!(lesson.current().unwrap().concept, "अनुच्छेद 14");
        let answer = lesson.answer(&"a".into()).unwrap();
        assert_eq!(answer.result.unwrap().learned_concepts, vec!["अनुच्छेद 14".to_string()]);
    }

    #[test]
    fn test_must_answer_before_advancing() {
        let mut lesson = walkthrough();
        assert_eq!(lesson.advance(&ProgressProfile::default()), Err(QuestionError::NotAnswered));
        lesson.answer(&"b".into()).unwrap();
        assert_eq!(lesson.answer(&"a".into()), Err(QuestionError::AlreadyAnswered));
        assert_eq!(lesson.position(), (1, 2));
    }
}
