//! Progress snapshot DTO - whole-profile shape exchanged with the store

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::entities::ProgressProfile;
use crate::domain::value_objects::{null_as_default, ModuleId};

/// `{ points, badges[], completed_modules{id: true}, learned_concepts[] }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshotDto {
    #[serde(default, deserialize_with = "null_as_default")]
    pub points: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub badges: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed_modules: BTreeMap<String, bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub learned_concepts: Vec<String>,
}

impl From<&ProgressProfile> for ProgressSnapshotDto {
    fn from(profile: &ProgressProfile) -> Self {
        Self {
            points: profile.points,
            badges: profile.badges.iter().cloned().collect(),
            completed_modules: profile
                .completed_modules
                .iter()
                .map(|id| (id.to_string(), true))
                .collect(),
            learned_concepts: profile.learned_concepts.iter().cloned().collect(),
        }
    }
}

impl From<ProgressSnapshotDto> for ProgressProfile {
    fn from(dto: ProgressSnapshotDto) -> Self {
        Self {
            points: dto.points,
            badges: dto.badges.into_iter().collect(),
            completed_modules: dto
                .completed_modules
                .into_iter()
                .filter(|(_, done)| *done)
                .map(|(id, _)| ModuleId::from(id))
                .collect(),
            learned_concepts: dto.learned_concepts.into_iter().collect(),
        }
    }
}
