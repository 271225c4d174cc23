//! Scoring & streak engine shared by the quiz mini-games
//!
//! Pure functions over [`ScoringState`]; no I/O, no hidden state.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ScoringRules;

/// Session-scoped score and streak for one quiz game
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringState {
    pub score: u32,
    pub streak: u32,
}

/// Result of evaluating one answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Nominal points change; a penalty is reported in full even when the
    /// score clamps at zero
    pub delta: i32,
    pub new_state: ScoringState,
    /// Set on the answer that brings the streak to the badge threshold
    pub badge: Option<String>,
}

/// Score one answer.
///
/// The streak badge is edge-triggered: it fires on the answer where the
/// streak becomes equal to the threshold, and again only if the streak is
/// broken and rebuilt. Callers that want one award per session de-duplicate.
pub fn evaluate(is_correct: bool, state: ScoringState, rules: &ScoringRules) -> Evaluation {
    if is_correct {
        let bonus = state
            .streak
            .saturating_mul(rules.streak_bonus_per_step)
            .min(rules.streak_bonus_cap);
        let points = rules.base.saturating_add(bonus);
        let new_state = ScoringState {
            score: state.score.saturating_add(points),
            streak: state.streak.saturating_add(1),
        };
        let badge = (rules.streak_badge_threshold > 0
            && new_state.streak == rules.streak_badge_threshold)
            .then(|| rules.streak_badge.clone());

        Evaluation {
            delta: i32::try_from(points).unwrap_or(i32::MAX),
            new_state,
            badge,
        }
    } else {
        Evaluation {
            delta: -i32::try_from(rules.wrong_penalty).unwrap_or(i32::MAX),
            new_state: ScoringState {
                score: state.score.saturating_sub(rules.wrong_penalty),
                streak: 0,
            },
            badge: None,
        }
    }
}

/// An unanswered card breaks the streak without a penalty
pub fn timeout(state: ScoringState) -> ScoringState {
    ScoringState {
        score: state.score,
        streak: 0,
    }
}

/// Badge earned by a session's final score, if any
pub fn final_badge(score: u32, rules: &ScoringRules) -> Option<String> {
    (score >= rules.final_score_badge_threshold).then(|| rules.final_score_badge.clone())
}
