//! Board topology for Snakes & Ladders

use serde::{Deserialize, Serialize};

use crate::domain::entities::Scenario;
use crate::domain::value_objects::ScenarioId;

pub const DEFAULT_BOARD_SIZE: u32 = 30;

/// Index of a board cell, zero-based
pub type CellIndex = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionKind {
    Ladder,
    Snake,
}

impl TransitionKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Ladder => "Ladder",
            Self::Snake => "Snake",
        }
    }
}

/// A ladder or snake, optionally gated by a scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardTransition {
    pub from: CellIndex,
    pub to: CellIndex,
    #[serde(alias = "type")]
    pub kind: TransitionKind,
    #[serde(default)]
    pub scenario_id: Option<ScenarioId>,
}

impl BoardTransition {
    pub fn ladder(from: CellIndex, to: CellIndex) -> Self {
        Self {
            from,
            to,
            kind: TransitionKind::Ladder,
            scenario_id: None,
        }
    }

    pub fn snake(from: CellIndex, to: CellIndex) -> Self {
        Self {
            from,
            to,
            kind: TransitionKind::Snake,
            scenario_id: None,
        }
    }

    pub fn gated_by(mut self, scenario_id: impl Into<ScenarioId>) -> Self {
        self.scenario_id = Some(scenario_id.into());
        self
    }

    pub fn is_ladder(&self) -> bool {
        self.kind == TransitionKind::Ladder
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("Board needs at least 2 cells, got {0}")]
    TooSmall(u32),
    #[error("Transition from cell {0} points at itself")]
    SelfLoop(CellIndex),
    #[error("More than one transition starts at cell {0}")]
    DuplicateOrigin(CellIndex),
    #[error("Transition {from} -> {to} leaves the board (last cell is {last})")]
    OutOfRange {
        from: CellIndex,
        to: CellIndex,
        last: CellIndex,
    },
}

/// Cells plus their ladders and snakes. Deserializing goes through
/// [`BoardLayout::new`], so the same checks apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "UncheckedLayout")]
pub struct BoardLayout {
    cell_count: u32,
    transitions: Vec<BoardTransition>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UncheckedLayout {
    cell_count: u32,
    #[serde(default)]
    transitions: Vec<BoardTransition>,
}

impl TryFrom<UncheckedLayout> for BoardLayout {
    type Error = LayoutError;

    fn try_from(raw: UncheckedLayout) -> Result<Self, Self::Error> {
        Self::new(raw.cell_count, raw.transitions)
    }
}

impl BoardLayout {
    /// Build a layout, rejecting self-loops, duplicate origins and
    /// out-of-range cells.
    pub fn new(cell_count: u32, transitions: Vec<BoardTransition>) -> Result<Self, LayoutError> {
        if cell_count < 2 {
            return Err(LayoutError::TooSmall(cell_count));
        }
        let last = cell_count - 1;
        for (i, transition) in transitions.iter().enumerate() {
            if transition.from == transition.to {
                return Err(LayoutError::SelfLoop(transition.from));
            }
            if transition.from > last || transition.to > last {
                return Err(LayoutError::OutOfRange {
                    from: transition.from,
                    to: transition.to,
                    last,
                });
            }
            if transitions[..i].iter().any(|t| t.from == transition.from) {
                return Err(LayoutError::DuplicateOrigin(transition.from));
            }
        }
        Ok(Self {
            cell_count,
            transitions,
        })
    }

    /// The standard 30-cell board with three ladders and three snakes
    pub fn standard() -> Self {
        Self {
            cell_count: DEFAULT_BOARD_SIZE,
            transitions: vec![
                BoardTransition::ladder(3, 12),
                BoardTransition::snake(7, 2),
                BoardTransition::ladder(15, 25),
                BoardTransition::snake(20, 8),
                BoardTransition::ladder(22, 28),
                BoardTransition::snake(27, 18),
            ],
        }
    }

    pub fn cell_count(&self) -> u32 {
        self.cell_count
    }

    pub fn last_cell(&self) -> CellIndex {
        self.cell_count.saturating_sub(1)
    }

    pub fn transitions(&self) -> &[BoardTransition] {
        &self.transitions
    }

    pub fn transition_from(&self, cell: CellIndex) -> Option<&BoardTransition> {
        self.transitions.iter().find(|t| t.from == cell)
    }

    /// Gate transition `i` with `pool[i % len]`. An empty pool leaves the
    /// layout untouched.
    pub fn assign_scenarios(mut self, pool: &[Scenario]) -> Self {
        if pool.is_empty() {
            return self;
        }
        for (i, transition) in self.transitions.iter_mut().enumerate() {
            transition.scenario_id = Some(pool[i % pool.len()].id.clone());
        }
        self
    }
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self::standard()
    }
}
