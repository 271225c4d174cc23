//! Progress store port - Interface for durable profile storage
//!
//! The store only ever receives whole profiles; authentication and conflict
//! resolution are the store's concern.

use async_trait::async_trait;

use crate::domain::entities::ProgressProfile;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgressStoreError {
    #[error("Progress store unavailable: {0}")]
    Unavailable(String),
    #[error("Progress store rejected the request ({status}): {body}")]
    Rejected { status: u16, body: String },
    #[error("Progress store returned an unreadable payload: {0}")]
    InvalidPayload(String),
}

#[async_trait]
pub trait ProgressStorePort: Send + Sync {
    async fn fetch_profile(&self) -> Result<ProgressProfile, ProgressStoreError>;

    /// Replace the stored profile with `profile`
    async fn save_profile(&self, profile: &ProgressProfile) -> Result<(), ProgressStoreError>;
}
