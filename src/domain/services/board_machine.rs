//! Snakes & Ladders state machine
//!
//! Phases: `Idle -> Rolling -> (Idle | AwaitingScenarioAnswer | Finished)`,
//! and `AwaitingScenarioAnswer -> (Idle | Finished)` once the gate is
//! answered. Every request checks the current phase first; a rejected
//! request returns a [`BoardError`] and leaves the state untouched.
//!
//! The die is never drawn inside a transition function. [`BoardStateMachine::roll`]
//! takes the RNG from the caller, and [`BoardStateMachine::apply_roll`]
//! accepts a scripted value, so sequences are reproducible in tests.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    BoardLayout, BoardTransition, CellIndex, GameResult, Scenario, TransitionKind,
};
use crate::domain::value_objects::OptionId;

pub const DIE_FACES: u32 = 6;
pub const COMPLETION_BONUS: u32 = 50;
pub const COMPLETION_BADGE: &str = "Constitutional Champion";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardPhase {
    Idle,
    Rolling,
    AwaitingScenarioAnswer,
    Finished,
}

/// Pre-roll snapshot kept for undo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveSnapshot {
    pub position: CellIndex,
    pub score: u32,
    pub last_roll: u32,
}

/// A transition waiting on a scenario answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingGate {
    pub transition: BoardTransition,
    pub landed_position: CellIndex,
    pub scenario: Scenario,
}

/// Session-scoped board state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardState {
    pub position: CellIndex,
    pub score: u32,
    pub phase: BoardPhase,
    pub pending_gate: Option<PendingGate>,
    pub history: Vec<MoveSnapshot>,
}

impl BoardState {
    pub fn is_finished(&self) -> bool {
        self.phase == BoardPhase::Finished
    }

    pub fn last_roll(&self) -> Option<u32> {
        self.history.last().map(|snapshot| snapshot.last_roll)
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            position: 0,
            score: 0,
            phase: BoardPhase::Idle,
            pending_gate: None,
            history: Vec::new(),
        }
    }
}

/// Reward for reaching the last cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Session score plus the completion bonus
    pub points: u32,
    pub badge: &'static str,
}

impl Completion {
    fn for_score(score: u32) -> Self {
        Self {
            points: score.saturating_add(COMPLETION_BONUS),
            badge: COMPLETION_BADGE,
        }
    }
}

impl From<Completion> for GameResult {
    fn from(completion: Completion) -> Self {
        GameResult::points(i64::from(completion.points)).with_badge(completion.badge)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollOutcome {
    /// Landed on a plain cell, or on a transition that had no quiz content
    /// and was applied automatically
    Moved {
        roll: u32,
        landed: CellIndex,
        position: CellIndex,
    },
    /// A scenario gate is waiting for an answer
    GateOpened {
        roll: u32,
        landed: CellIndex,
        kind: TransitionKind,
    },
    Finished {
        roll: u32,
        position: CellIndex,
        completion: Completion,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateOutcome {
    pub correct: bool,
    pub kind: TransitionKind,
    pub delta: i32,
    pub position: CellIndex,
    pub completion: Option<Completion>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("Request not allowed while {0:?}")]
    NotIdle(BoardPhase),
    #[error("No roll in progress")]
    NotRolling,
    #[error("No scenario gate is waiting for an answer")]
    NoPendingGate,
    #[error("Nothing to undo")]
    NothingToUndo,
    #[error("Roll must be between 1 and {DIE_FACES}, got {0}")]
    InvalidRoll(u32),
}

/// Whether a gate answer takes the transition, and the score change.
fn gate_rule(correct: bool, kind: TransitionKind) -> (bool, i32) {
    match (correct, kind) {
        (true, TransitionKind::Ladder) => (true, 10),
        (true, TransitionKind::Snake) => (false, 5),
        (false, TransitionKind::Ladder) => (false, -2),
        (false, TransitionKind::Snake) => (true, -5),
    }
}

fn apply_delta(score: u32, delta: i32) -> u32 {
    let next = i64::from(score) + i64::from(delta);
    u32::try_from(next.max(0)).unwrap_or(u32::MAX)
}

/// Board engine over a fixed layout and scenario pool
#[derive(Debug, Clone)]
pub struct BoardStateMachine {
    layout: BoardLayout,
    scenarios: Vec<Scenario>,
    state: BoardState,
}

impl BoardStateMachine {
    pub fn new(layout: BoardLayout, scenarios: Vec<Scenario>) -> Self {
        Self {
            layout,
            scenarios,
            state: BoardState::default(),
        }
    }

    /// Resume from a previously captured state
    pub fn with_state(mut self, state: BoardState) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    pub fn phase(&self) -> BoardPhase {
        self.state.phase
    }

    /// Draw a die from `rng` and apply it
    pub fn roll<R: Rng>(&mut self, rng: &mut R) -> Result<RollOutcome, BoardError> {
        self.begin_roll()?;
        let value = rng.gen_range(1..=DIE_FACES);
        self.apply_roll(value)
    }

    /// `Idle -> Rolling`. Rejected in any other phase.
    pub fn begin_roll(&mut self) -> Result<(), BoardError> {
        if self.state.phase != BoardPhase::Idle {
            return Err(BoardError::NotIdle(self.state.phase));
        }
        self.state.phase = BoardPhase::Rolling;
        Ok(())
    }

    /// Apply a die value to a roll in progress
    pub fn apply_roll(&mut self, roll: u32) -> Result<RollOutcome, BoardError> {
        if self.state.phase != BoardPhase::Rolling {
            return Err(BoardError::NotRolling);
        }
        if !(1..=DIE_FACES).contains(&roll) {
            return Err(BoardError::InvalidRoll(roll));
        }

        self.state.history.push(MoveSnapshot {
            position: self.state.position,
            score: self.state.score,
            last_roll: roll,
        });

        let last = self.layout.last_cell();
        let landed = self.state.position.saturating_add(roll).min(last);
        self.state.position = landed;
        tracing::debug!(roll, landed, "Roll applied");

        let Some(transition) = self.layout.transition_from(landed).cloned() else {
            return Ok(self.settle(roll, landed));
        };

        match self.gate_scenario(&transition, landed) {
            Some(scenario) => {
                tracing::debug!(
                    landed,
                    kind = transition.kind.display_name(),
                    scenario_id = %scenario.id,
                    "Scenario gate opened"
                );
                let kind = transition.kind;
                self.state.pending_gate = Some(PendingGate {
                    transition,
                    landed_position: landed,
                    scenario,
                });
                self.state.phase = BoardPhase::AwaitingScenarioAnswer;
                Ok(RollOutcome::GateOpened { roll, landed, kind })
            }
            None => {
                tracing::debug!(
                    landed,
                    to = transition.to,
                    "No scenario content for gate, applying transition"
                );
                self.state.position = transition.to;
                Ok(self.settle(roll, landed))
            }
        }
    }

    /// Resolve the pending gate with the player's answer
    pub fn answer(&mut self, answer: &OptionId) -> Result<GateOutcome, BoardError> {
        if self.state.phase != BoardPhase::AwaitingScenarioAnswer {
            return Err(BoardError::NoPendingGate);
        }
        let gate = self
            .state
            .pending_gate
            .take()
            .ok_or(BoardError::NoPendingGate)?;

        let correct = gate.scenario.is_correct(answer);
        let kind = gate.transition.kind;
        let (take_transition, delta) = gate_rule(correct, kind);

        self.state.position = if take_transition {
            gate.transition.to
        } else {
            gate.landed_position
        };
        self.state.score = apply_delta(self.state.score, delta);
        tracing::debug!(
            correct,
            kind = kind.display_name(),
            delta,
            position = self.state.position,
            "Scenario gate resolved"
        );

        let completion = self.finish_if_at_end();
        if completion.is_none() {
            self.state.phase = BoardPhase::Idle;
        }

        Ok(GateOutcome {
            correct,
            kind,
            delta,
            position: self.state.position,
            completion,
        })
    }

    /// Restore the most recent pre-roll snapshot. Only allowed while idle.
    pub fn undo(&mut self) -> Result<MoveSnapshot, BoardError> {
        if self.state.phase != BoardPhase::Idle {
            return Err(BoardError::NotIdle(self.state.phase));
        }
        let snapshot = self.state.history.pop().ok_or(BoardError::NothingToUndo)?;
        self.state.position = snapshot.position;
        self.state.score = snapshot.score;
        Ok(snapshot)
    }

    pub fn reset(&mut self) {
        self.state = BoardState::default();
    }

    /// Scenario for a gate: the assigned one, else a pool entry picked by the
    /// landing cell, else none (the gate auto-resolves).
    fn gate_scenario(&self, transition: &BoardTransition, landed: CellIndex) -> Option<Scenario> {
        if self.scenarios.is_empty() {
            return None;
        }
        transition
            .scenario_id
            .as_ref()
            .and_then(|id| self.scenarios.iter().find(|s| s.id == *id))
            .or_else(|| {
                let index = landed as usize % self.scenarios.len();
                self.scenarios.get(index)
            })
            .cloned()
    }

    fn settle(&mut self, roll: u32, landed: CellIndex) -> RollOutcome {
        match self.finish_if_at_end() {
            Some(completion) => RollOutcome::Finished {
                roll,
                position: self.state.position,
                completion,
            },
            None => {
                self.state.phase = BoardPhase::Idle;
                RollOutcome::Moved {
                    roll,
                    landed,
                    position: self.state.position,
                }
            }
        }
    }

    fn finish_if_at_end(&mut self) -> Option<Completion> {
        if self.state.position != self.layout.last_cell() {
            return None;
        }
        self.state.phase = BoardPhase::Finished;
        let completion = Completion::for_score(self.state.score);
        tracing::info!(points = completion.points, "Board finished");
        Some(completion)
    }
}
