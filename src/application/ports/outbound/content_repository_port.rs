//! Content repository port - Interface for fetching modules and scenarios
//!
//! Adapters normalize transport shapes into domain entities, so services
//! never see backend field names.

use async_trait::async_trait;

use crate::domain::entities::{Module, Scenario};
use crate::domain::value_objects::ModuleId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// Timeout, connection failure or non-success status
    #[error("Content repository unavailable: {0}")]
    Unavailable(String),
    #[error("Content repository returned an unreadable payload: {0}")]
    InvalidPayload(String),
}

/// Port for the remote content store
#[async_trait]
pub trait ContentRepositoryPort: Send + Sync {
    /// List every module with its translations
    async fn load_modules(&self) -> Result<Vec<Module>, RepositoryError>;

    /// List a module's scenarios in display order
    async fn load_scenarios(&self, module_id: &ModuleId) -> Result<Vec<Scenario>, RepositoryError>;
}
