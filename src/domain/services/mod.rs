//! Domain services - Pure game rules shared by every mini-game

pub mod board_machine;
pub mod builtin_questions;
pub mod content_validator;
pub mod distractor_builder;
pub mod progress_aggregator;
pub mod scoring;

pub use board_machine::{
    BoardError, BoardPhase, BoardState, BoardStateMachine, Completion, GateOutcome, MoveSnapshot,
    PendingGate, RollOutcome, COMPLETION_BADGE, COMPLETION_BONUS, DIE_FACES,
};
pub use builtin_questions::{wheel_fallback, writ_fallback, WRIT_FALLBACK_ID};
pub use content_validator::{validate_catalog, validate_module, validate_scenario, ContentIssue};
pub use distractor_builder::{build_choices, DEFAULT_MAX_CHOICES};
pub use progress_aggregator::{
    learned_scenario, merge, module_completion, LEARNED_SCENARIO_POINTS, MODULE_COMPLETION_BONUS,
};
pub use scoring::{evaluate, final_badge, timeout, Evaluation, ScoringState};
