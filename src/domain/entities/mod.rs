//! Domain entities - Core business objects with identity

mod board;
mod module;
mod progress;
mod scenario;

pub use board::{
    BoardLayout, BoardTransition, CellIndex, LayoutError, TransitionKind, DEFAULT_BOARD_SIZE,
};
pub use module::{Module, ModuleTranslation};
pub use progress::{GameResult, ProgressProfile};
pub use scenario::{AnswerOption, Scenario, ScenarioTranslation};
