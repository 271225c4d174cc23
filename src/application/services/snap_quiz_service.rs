//! Scenario Snap - a timed multiple-choice deck
//!
//! Cards are dealt from a shuffled deck. Each card's choices are built once,
//! when it is dealt, so re-rendering never reshuffles them. Scoring goes
//! through the shared streak engine.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::application::services::quiz::{AnswerFeedback, QuestionView};
use crate::domain::entities::{GameResult, Scenario};
use crate::domain::services::scoring::{self, Evaluation, ScoringState};
use crate::domain::services::{build_choices, DEFAULT_MAX_CHOICES};
use crate::domain::value_objects::{GameSessionId, LanguageCode, OptionId, ScenarioId, ScoringRules};

pub const DEFAULT_DECK_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapError {
    #[error("The deck is finished")]
    SessionComplete,
    #[error("This card was already answered")]
    AlreadyAnswered,
    #[error("Answer the card before moving on")]
    NotAnswered,
}

/// The card in play
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapCard {
    /// Zero-based position in the deck
    pub index: usize,
    pub total: usize,
    pub question: QuestionView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapFeedback {
    pub feedback: AnswerFeedback,
    pub evaluation: Evaluation,
    /// Streak badge award, to be recorded on the profile
    pub badge_result: Option<GameResult>,
}

/// End-of-deck summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapSummary {
    pub score: u32,
    pub correct: usize,
    pub cards: usize,
    pub review_later: Vec<ScenarioId>,
    /// Final score plus the final-score badge when earned
    pub result: GameResult,
}

pub struct SnapQuizSession<R: Rng = StdRng> {
    id: GameSessionId,
    deck: Vec<Scenario>,
    language: LanguageCode,
    rules: ScoringRules,
    rng: R,
    scoring: ScoringState,
    card: Option<SnapCard>,
    resolved: bool,
    correct: usize,
    review_later: BTreeSet<ScenarioId>,
}

impl<R: Rng> SnapQuizSession<R> {
    /// Shuffle `scenarios` and keep at most `deck_size` of them
    pub fn new(scenarios: &[Scenario], deck_size: usize, language: LanguageCode, mut rng: R) -> Self {
        let mut deck = scenarios.to_vec();
        deck.shuffle(&mut rng);
        deck.truncate(deck_size);

        let mut session = Self {
            id: GameSessionId::new(),
            deck,
            language,
            rules: ScoringRules::default(),
            rng,
            scoring: ScoringState::default(),
            card: None,
            resolved: false,
            correct: 0,
            review_later: BTreeSet::new(),
        };
        session.deal(0);
        info!(session_id = %session.id, cards = session.deck.len(), "Snap deck dealt");
        session
    }

    pub fn with_rules(mut self, rules: ScoringRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn id(&self) -> GameSessionId {
        self.id
    }

    /// Switch display language; the open card is re-dealt in it
    pub fn set_language(&mut self, language: LanguageCode) {
        self.language = language;
        if let Some(index) = self.card.as_ref().map(|card| card.index) {
            let resolved = self.resolved;
            self.deal(index);
            self.resolved = resolved;
        }
    }

    pub fn scoring(&self) -> ScoringState {
        self.scoring
    }

    pub fn current_card(&self) -> Option<&SnapCard> {
        self.card.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.card.is_none()
    }

    pub fn answer(&mut self, answer: &OptionId) -> Result<SnapFeedback, SnapError> {
        let index = self.open_card()?.index;
        let scenario = &self.deck[index];

        let feedback = AnswerFeedback::for_answer(scenario, &self.language, answer);
        let evaluation = scoring::evaluate(feedback.correct, self.scoring, &self.rules);
        debug!(
            session_id = %self.id,
            scenario_id = %scenario.id,
            correct = feedback.correct,
            delta = evaluation.delta,
            streak = evaluation.new_state.streak,
            "Snap card answered"
        );

        self.scoring = evaluation.new_state;
        self.resolved = true;
        if feedback.correct {
            self.correct += 1;
        }
        let badge_result = evaluation
            .badge
            .clone()
            .map(|badge| GameResult::default().with_badge(badge));

        Ok(SnapFeedback {
            feedback,
            evaluation,
            badge_result,
        })
    }

    /// The timer ran out on the current card
    pub fn time_out(&mut self) -> Result<ScoringState, SnapError> {
        self.open_card()?;
        self.scoring = scoring::timeout(self.scoring);
        self.resolved = true;
        debug!(session_id = %self.id, "Snap card timed out");
        Ok(self.scoring)
    }

    /// Flip the current card's review-later mark; returns the new mark
    pub fn toggle_review_later(&mut self) -> Result<bool, SnapError> {
        let card = self.card.as_ref().ok_or(SnapError::SessionComplete)?;
        let id = card.question.scenario_id.clone();
        if self.review_later.remove(&id) {
            Ok(false)
        } else {
            self.review_later.insert(id);
            Ok(true)
        }
    }

    pub fn review_later(&self) -> &BTreeSet<ScenarioId> {
        &self.review_later
    }

    /// Move past a resolved card. Returns the summary after the last card.
    pub fn advance(&mut self) -> Result<Option<SnapSummary>, SnapError> {
        let card = self.card.as_ref().ok_or(SnapError::SessionComplete)?;
        if !self.resolved {
            return Err(SnapError::NotAnswered);
        }

        let next = card.index + 1;
        if next < self.deck.len() {
            self.deal(next);
            return Ok(None);
        }

        self.card = None;
        Ok(Some(self.summary()))
    }

    fn open_card(&self) -> Result<&SnapCard, SnapError> {
        let card = self.card.as_ref().ok_or(SnapError::SessionComplete)?;
        if self.resolved {
            return Err(SnapError::AlreadyAnswered);
        }
        Ok(card)
    }

    fn deal(&mut self, index: usize) {
        self.resolved = false;
        self.card = self.deck.get(index).map(|scenario| {
            let choices = build_choices(
                scenario,
                &self.language,
                &self.deck,
                DEFAULT_MAX_CHOICES,
                &mut self.rng,
            );
            SnapCard {
                index,
                total: self.deck.len(),
                question: QuestionView::with_options(scenario, &self.language, choices),
            }
        });
    }

    fn summary(&self) -> SnapSummary {
        let score = self.scoring.score;
        let mut result = GameResult::points(i64::from(score));
        if let Some(badge) = scoring::final_badge(score, &self.rules) {
            result = result.with_badge(badge);
        }
        info!(session_id = %self.id, score, correct = self.correct, "Snap deck finished");

        SnapSummary {
            score,
            correct: self.correct,
            cards: self.deck.len(),
            review_later: self.review_later.iter().cloned().collect(),
            result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{AnswerOption, ScenarioTranslation};
    use crate::domain::value_objects::{SNAP_CHAMPION_BADGE, SNAP_MASTER_BADGE};
    use rand::SeedableRng;

    fn deck(n: usize) -> Vec<Scenario> {
        (0..n)
            .map(|i| {
                Scenario::new(format!("s{}", i), "equality", "a").with_translation(
                    "en",
                    ScenarioTranslation {
                        concept: format!("Concept {}", i),
                        options: vec![
                            AnswerOption::new("a", format!("Right {}", i)),
                            AnswerOption::new("b", format!("Wrong {}", i)),
                        ],
                        ..Default::default()
                    },
                )
            })
            .collect()
    }

    fn session(n: usize, deck_size: usize) -> SnapQuizSession {
        SnapQuizSession::new(&deck(n), deck_size, "en".into(), StdRng::seed_from_u64(17))
    }

    #[test]
    fn test_language_switch_redeals_open_card() {
        let bilingual: Vec<Scenario> = deck(4)
            .into_iter()
            .enumerate()
            .map(|(i, scenario)| {
                scenario.with_translation(
                    "hi",
                    ScenarioTranslation {
                        concept: format!("अवधारणा {}", i),
                        options: vec![
                            AnswerOption::new("a", format!("सही {}", i)),
                            AnswerOption::new("b", format!("गलत {}", i)),
                        ],
                        ..Default::default()
                    },
                )
            })
            .collect();
        let mut session = SnapQuizSession::new(&bilingual, 4, "en".into(), StdRng::seed_from_u64(5));
        let scenario_id = session.current_card().unwrap().question.scenario_id.clone();

        session.set_language("hi".into());
        let card = session.current_card().unwrap();
        assert_eq!(card.index, 0);
        assert_eq!(card.question.scenario_id, scenario_id);
        assert!(card.question.concept.starts_with("अवधारणा"));
        assert!(card
            .question
            .options
            .iter()
            .all(|o| o.text.starts_with("सही") || o.text.starts_with("गलत")));
        assert!(session.answer(&"a".into()).unwrap().feedback.correct);
    }

    #[test]
    fn test_deck_is_capped() {
        let session = session(14, DEFAULT_DECK_SIZE);
        let card = session.current_card().unwrap();
        assert_eq!(card.index, 0);
        assert_eq!(card.total, DEFAULT_DECK_SIZE);
    }

    #[test]
    fn test_choices_fixed_per_card() {
        let mut session = session(6, DEFAULT_DECK_SIZE);
        let before = session.current_card().unwrap().question.options.clone();
        assert!(before.iter().filter(|o| o.id.as_str() == "a").count() == 1);

        session.toggle_review_later().unwrap();
        assert_eq!(session.current_card().unwrap().question.options, before);
    }

    #[test]
    fn test_perfect_run_earns_both_badges() {
        let mut session = session(10, DEFAULT_DECK_SIZE);
        let mut streak_badges = Vec::new();
        let mut summary = None;

        while summary.is_none() {
            let feedback = session.answer(&"a".into()).unwrap();
            assert!(feedback.feedback.correct);
            if let Some(result) = feedback.badge_result {
                streak_badges.push(result.badge.unwrap());
            }
            summary = session.advance().unwrap();
        }

        let summary = summary.unwrap();
        // 10 + 12 + 14 + 16 + 18 + 20 * 5
        assert_eq!(summary.score, 170);
        assert_eq!(summary.correct, 10);
        assert_eq!(streak_badges, vec![SNAP_MASTER_BADGE.to_string()]);
        assert_eq!(summary.result.badge.as_deref(), Some(SNAP_CHAMPION_BADGE));
        assert!(session.is_complete());
        assert_eq!(session.answer(&"a".into()).unwrap_err(), SnapError::SessionComplete);
    }

    #[test]
    fn test_guards() {
        let mut session = session(3, DEFAULT_DECK_SIZE);
        assert_eq!(session.advance(), Err(SnapError::NotAnswered));

        session.answer(&"b".into()).unwrap();
        assert_eq!(session.answer(&"a".into()).unwrap_err(), SnapError::AlreadyAnswered);
        assert_eq!(session.time_out(), Err(SnapError::AlreadyAnswered));
    }

    #[test]
    fn test_timeout_breaks_streak_without_penalty() {
        let mut session = session(3, DEFAULT_DECK_SIZE);
        session.answer(&"a".into()).unwrap();
        session.advance().unwrap();

        let state = session.time_out().unwrap();
        assert_eq!(state, ScoringState { score: 10, streak: 0 });
        assert_eq!(session.advance(), Ok(None));
    }

    #[test]
    fn test_low_score_summary_has_no_badge() {
        let mut session = session(2, DEFAULT_DECK_SIZE);
        session.toggle_review_later().unwrap();
        let marked = session.current_card().unwrap().question.scenario_id.clone();
        session.answer(&"b".into()).unwrap();
        session.advance().unwrap();
        session.answer(&"a".into()).unwrap();

        let summary = session.advance().unwrap().unwrap();
        assert_eq!(summary.score, 10);
        assert_eq!(summary.result, GameResult::points(10));
        assert_eq!(summary.review_later, vec![marked]);
    }

    #[test]
    fn test_empty_deck_is_complete() {
        let mut session = session(0, DEFAULT_DECK_SIZE);
        assert!(session.is_complete());
        assert_eq!(session.advance(), Err(SnapError::SessionComplete));
    }
}
