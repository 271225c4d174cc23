//! Scoring rule tables for quiz mini-games

use serde::{Deserialize, Serialize};

pub const SNAP_MASTER_BADGE: &str = "Snap Master";
pub const SNAP_CHAMPION_BADGE: &str = "Snap Champion";

/// Point and badge rules consumed by the scoring engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringRules {
    /// Points for any correct answer
    pub base: u32,
    /// Upper bound on the streak bonus
    pub streak_bonus_cap: u32,
    /// Bonus per answer already in the streak
    pub streak_bonus_per_step: u32,
    pub wrong_penalty: u32,
    /// Streak length that awards `streak_badge`
    pub streak_badge_threshold: u32,
    pub streak_badge: String,
    /// Final session score that awards `final_score_badge`
    pub final_score_badge_threshold: u32,
    pub final_score_badge: String,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            base: 10,
            streak_bonus_cap: 10,
            streak_bonus_per_step: 2,
            wrong_penalty: 5,
            streak_badge_threshold: 5,
            streak_badge: SNAP_MASTER_BADGE.to_string(),
            final_score_badge_threshold: 80,
            final_score_badge: SNAP_CHAMPION_BADGE.to_string(),
        }
    }
}
