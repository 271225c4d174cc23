//! Progress Service - merges game results and syncs the whole profile
//!
//! The in-memory profile is authoritative for the session. Every record is
//! merged locally first; a failed send only marks the profile dirty, and
//! the next record or [`ProgressService::flush`] re-sends the full snapshot.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::application::ports::outbound::{ProgressStoreError, ProgressStorePort};
use crate::domain::entities::{GameResult, ProgressProfile};
use crate::domain::services::merge;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    Saved,
    /// Kept locally; will be re-sent
    Pending(String),
    /// Nothing changed, nothing sent
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOutcome {
    pub profile: ProgressProfile,
    pub sync: SyncStatus,
}

#[derive(Debug, Default)]
struct ProgressState {
    profile: ProgressProfile,
    dirty: bool,
    last_synced_at: Option<DateTime<Utc>>,
}

pub struct ProgressService {
    store: Arc<dyn ProgressStorePort>,
    state: RwLock<ProgressState>,
}

impl ProgressService {
    pub fn new(store: Arc<dyn ProgressStorePort>) -> Self {
        Self {
            store,
            state: RwLock::new(ProgressState::default()),
        }
    }

    pub async fn profile(&self) -> ProgressProfile {
        self.state.read().await.profile.clone()
    }

    pub async fn is_dirty(&self) -> bool {
        self.state.read().await.dirty
    }

    pub async fn last_synced_at(&self) -> Option<DateTime<Utc>> {
        self.state.read().await.last_synced_at
    }

    /// Fetch the stored profile. Unsent local progress is merged on top of
    /// it; if the store is unavailable the local profile is kept.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<ProgressProfile, ProgressStoreError> {
        let remote = match self.store.fetch_profile().await {
            Ok(remote) => remote,
            Err(e) => {
                warn!("Progress store unavailable, keeping local profile: {}", e);
                return Err(e);
            }
        };

        let mut state = self.state.write().await;
        state.profile = if state.dirty {
            union(&remote, &state.profile)
        } else {
            remote
        };
        state.last_synced_at = Some(Utc::now());
        info!(points = state.profile.points, badges = state.profile.badges.len(), "Progress loaded");
        Ok(state.profile.clone())
    }

    /// Merge a result and send the whole updated profile
    #[instrument(skip(self, result), fields(points = result.points))]
    pub async fn record(&self, result: &GameResult) -> RecordOutcome {
        if result.is_empty() {
            return RecordOutcome {
                profile: self.profile().await,
                sync: SyncStatus::Skipped,
            };
        }

        let mut state = self.state.write().await;
        state.profile = merge(&state.profile, result);
        state.dirty = true;
        debug!(total = state.profile.points, "Result merged");

        let sync = self.send(&mut state).await;
        RecordOutcome {
            profile: state.profile.clone(),
            sync,
        }
    }

    /// Re-send the latest profile if an earlier send failed
    pub async fn flush(&self) -> SyncStatus {
        let mut state = self.state.write().await;
        if !state.dirty {
            return SyncStatus::Skipped;
        }
        self.send(&mut state).await
    }

    async fn send(&self, state: &mut ProgressState) -> SyncStatus {
        match self.store.save_profile(&state.profile).await {
            Ok(()) => {
                state.dirty = false;
                state.last_synced_at = Some(Utc::now());
                SyncStatus::Saved
            }
            Err(e) => {
                warn!("Failed to save progress, keeping it locally: {}", e);
                SyncStatus::Pending(e.to_string())
            }
        }
    }
}

/// Local progress laid over a freshly fetched profile. Points take the
/// larger total since the local profile already started from a remote one.
fn union(remote: &ProgressProfile, local: &ProgressProfile) -> ProgressProfile {
    let mut merged = remote.clone();
    merged.points = remote.points.max(local.points);
    merged.badges.extend(local.badges.iter().cloned());
    merged.completed_modules.extend(local.completed_modules.iter().cloned());
    merged.learned_concepts.extend(local.learned_concepts.iter().cloned());
    merged
}
