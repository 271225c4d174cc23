//! Wheel of Rights - spin for a category, answer one question

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::application::services::quiz::{AnswerFeedback, QuestionError, QuestionView};
use crate::domain::entities::{GameResult, Module, Scenario};
use crate::domain::services::wheel_fallback;
use crate::domain::value_objects::{GameSessionId, LanguageCode, OptionId};

pub const WHEEL_POINTS: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelCategory {
    pub id: &'static str,
    pub name_en: &'static str,
    pub name_hi: &'static str,
}

impl WheelCategory {
    pub fn name(&self, language: &LanguageCode) -> &'static str {
        match language.as_str() {
            "hi" => self.name_hi,
            _ => self.name_en,
        }
    }
}

pub const WHEEL_CATEGORIES: [WheelCategory; 6] = [
    WheelCategory { id: "equality", name_en: "Equality", name_hi: "समानता" },
    WheelCategory { id: "freedom", name_en: "Freedom", name_hi: "स्वतंत्रता" },
    WheelCategory { id: "religion", name_en: "Religion", name_hi: "धर्म" },
    WheelCategory { id: "cultural", name_en: "Cultural", name_hi: "सांस्कृतिक" },
    WheelCategory { id: "remedies", name_en: "Remedies", name_hi: "उपचार" },
    WheelCategory { id: "exploitation", name_en: "Exploitation", name_hi: "शोषण" },
];

/// Segment under the pointer for a final angle in degrees
pub fn category_index(angle: f64, segments: usize) -> usize {
    if segments == 0 {
        return 0;
    }
    let scaled = (angle.rem_euclid(360.0) / 360.0 * segments as f64).floor();
    (scaled as usize) % segments
}

#[derive(Debug, Clone, PartialEq)]
pub struct WheelSpin {
    pub angle: f64,
    pub category: WheelCategory,
    /// `None` when neither the catalog nor the bundled set has a question
    pub question: Option<QuestionView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelAnswer {
    pub feedback: AnswerFeedback,
    pub result: Option<GameResult>,
}

pub struct WheelSession<R: Rng = StdRng> {
    id: GameSessionId,
    modules: Vec<Module>,
    scenarios: Vec<Scenario>,
    language: LanguageCode,
    rng: R,
    question: Option<Scenario>,
    answered: bool,
}

impl<R: Rng> WheelSession<R> {
    pub fn new(modules: Vec<Module>, scenarios: Vec<Scenario>, language: LanguageCode, rng: R) -> Self {
        Self {
            id: GameSessionId::new(),
            modules,
            scenarios,
            language,
            rng,
            question: None,
            answered: false,
        }
    }

    pub fn spin(&mut self) -> WheelSpin {
        let angle = self.rng.gen_range(0.0..360.0);
        let category = WHEEL_CATEGORIES[category_index(angle, WHEEL_CATEGORIES.len())];

        let candidates: Vec<&Scenario> = self
            .scenarios
            .iter()
            .filter(|s| self.in_category(s, category.id))
            .collect();
        self.question = candidates
            .choose(&mut self.rng)
            .map(|s| (*s).clone())
            .or_else(|| wheel_fallback(category.id));
        self.answered = false;

        debug!(
            session_id = %self.id,
            angle,
            category = category.id,
            candidates = candidates.len(),
            "Wheel spun"
        );
        WheelSpin {
            angle,
            category,
            question: self
                .question
                .as_ref()
                .map(|s| QuestionView::of(s, &self.language)),
        }
    }

    pub fn set_language(&mut self, language: LanguageCode) {
        self.language = language;
    }

    /// The question from the last spin, in the current language
    pub fn current_question(&self) -> Option<QuestionView> {
        self.question
            .as_ref()
            .map(|s| QuestionView::of(s, &self.language))
    }

    pub fn answer(&mut self, answer: &OptionId) -> Result<WheelAnswer, QuestionError> {
        let scenario = self.question.as_ref().ok_or(QuestionError::NoQuestion)?;
        if self.answered {
            return Err(QuestionError::AlreadyAnswered);
        }
        self.answered = true;

        let feedback = AnswerFeedback::for_answer(scenario, &self.language, answer);
        let result = feedback.correct.then(|| GameResult::points(WHEEL_POINTS));
        Ok(WheelAnswer { feedback, result })
    }

    fn in_category(&self, scenario: &Scenario, category: &str) -> bool {
        if scenario.module_id.as_str() == category {
            return true;
        }
        self.modules
            .iter()
            .find(|m| m.id == scenario.module_id)
            .map(|m| {
                m.translations
                    .resolve(&self.language)
                    .title
                    .to_lowercase()
                    .contains(category)
            })
            .unwrap_or(false)
    }
}
