//! Value objects - Immutable objects defined by their attributes

mod ids;
mod scoring_rules;
mod translations;

pub use ids::*;
pub use scoring_rules::{ScoringRules, SNAP_CHAMPION_BADGE, SNAP_MASTER_BADGE};
pub use translations::{null_as_default, resolve, Translations};
