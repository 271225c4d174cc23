//! Progress profile - durable per-user accumulation

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ModuleId;

/// Points, badges, completed modules and learned concepts for one user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressProfile {
    /// Lifetime points; sums are not re-clamped
    pub points: i64,
    pub badges: BTreeSet<String>,
    pub completed_modules: BTreeSet<ModuleId>,
    pub learned_concepts: BTreeSet<String>,
}

impl ProgressProfile {
    pub fn has_badge(&self, badge: &str) -> bool {
        self.badges.contains(badge)
    }

    pub fn has_completed(&self, module_id: &ModuleId) -> bool {
        self.completed_modules.contains(module_id)
    }
}

/// The effect of one mini-game outcome on a profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub points: i64,
    #[serde(default)]
    pub badge: Option<String>,
    #[serde(default)]
    pub completed_module: Option<ModuleId>,
    #[serde(default)]
    pub learned_concepts: Vec<String>,
}

impl GameResult {
    pub fn points(points: i64) -> Self {
        Self {
            points,
            ..Default::default()
        }
    }

    pub fn with_badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = Some(badge.into());
        self
    }

    pub fn with_completed_module(mut self, module_id: ModuleId) -> Self {
        self.completed_module = Some(module_id);
        self
    }

    pub fn with_learned_concept(mut self, concept: impl Into<String>) -> Self {
        self.learned_concepts.push(concept.into());
        self
    }

    /// Whether merging this result would change any profile
    pub fn is_empty(&self) -> bool {
        self.points == 0
            && self.badge.is_none()
            && self.completed_module.is_none()
            && self.learned_concepts.is_empty()
    }
}
