//! Board Game Session - Snakes & Ladders over a loaded catalog
//!
//! Owns the state machine, the session RNG and the player's language.
//! The only effect that leaves the session is the completion [`GameResult`].

use rand::rngs::StdRng;
use rand::Rng;
use tracing::{info, instrument};

use crate::application::services::quiz::{AnswerFeedback, QuestionView};
use crate::domain::entities::{BoardLayout, GameResult, Scenario};
use crate::domain::services::{
    BoardError, BoardPhase, BoardState, BoardStateMachine, GateOutcome, MoveSnapshot, RollOutcome,
};
use crate::domain::value_objects::{GameSessionId, LanguageCode, OptionId};

/// The gate question currently blocking the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateQuestion {
    pub kind_name: &'static str,
    pub landed: u32,
    pub target: u32,
    pub question: QuestionView,
}

/// A resolved gate plus the copy to show for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateAnswer {
    pub outcome: GateOutcome,
    pub feedback: AnswerFeedback,
}

pub struct BoardGameSession<R: Rng = StdRng> {
    id: GameSessionId,
    machine: BoardStateMachine,
    language: LanguageCode,
    rng: R,
    pending_result: Option<GameResult>,
}

impl<R: Rng> BoardGameSession<R> {
    pub fn new(layout: BoardLayout, scenarios: Vec<Scenario>, language: LanguageCode, rng: R) -> Self {
        Self {
            id: GameSessionId::new(),
            machine: BoardStateMachine::new(layout, scenarios),
            language,
            rng,
            pending_result: None,
        }
    }

    pub fn id(&self) -> GameSessionId {
        self.id
    }

    pub fn state(&self) -> &BoardState {
        self.machine.state()
    }

    pub fn layout(&self) -> &BoardLayout {
        self.machine.layout()
    }

    pub fn language(&self) -> &LanguageCode {
        &self.language
    }

    /// Switch display language mid-game; the state is unaffected
    pub fn set_language(&mut self, language: LanguageCode) {
        self.language = language;
    }

    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn roll(&mut self) -> Result<RollOutcome, BoardError> {
        let outcome = self.machine.roll(&mut self.rng)?;
        if let RollOutcome::Finished { completion, .. } = &outcome {
            self.pending_result = Some(completion.clone().into());
        }
        Ok(outcome)
    }

    /// Question for the gate the player landed on, if one is pending
    pub fn current_question(&self) -> Option<GateQuestion> {
        let gate = self.machine.state().pending_gate.as_ref()?;
        Some(GateQuestion {
            kind_name: gate.transition.kind.display_name(),
            landed: gate.landed_position,
            target: gate.transition.to,
            question: QuestionView::of(&gate.scenario, &self.language),
        })
    }

    #[instrument(skip(self, answer), fields(session_id = %self.id, answer = %answer))]
    pub fn answer(&mut self, answer: &OptionId) -> Result<GateAnswer, BoardError> {
        let scenario = self
            .machine
            .state()
            .pending_gate
            .as_ref()
            .map(|gate| gate.scenario.clone())
            .ok_or(BoardError::NoPendingGate)?;

        let outcome = self.machine.answer(answer)?;
        if let Some(completion) = &outcome.completion {
            self.pending_result = Some(completion.clone().into());
        }
        Ok(GateAnswer {
            feedback: AnswerFeedback::for_answer(&scenario, &self.language, answer),
            outcome,
        })
    }

    pub fn undo(&mut self) -> Result<MoveSnapshot, BoardError> {
        self.machine.undo()
    }

    /// Start over; an unclaimed completion result is discarded
    pub fn reset(&mut self) {
        info!(session_id = %self.id, "Board reset");
        self.machine.reset();
        self.pending_result = None;
    }

    pub fn is_finished(&self) -> bool {
        self.machine.phase() == BoardPhase::Finished
    }

    /// Completion result, handed out once
    pub fn take_result(&mut self) -> Option<GameResult> {
        self.pending_result.take()
    }
}
