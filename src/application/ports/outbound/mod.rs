//! Outbound ports - Interfaces that the application requires from external systems

mod content_repository_port;
mod progress_store_port;

pub use content_repository_port::{ContentRepositoryPort, RepositoryError};
pub use progress_store_port::{ProgressStoreError, ProgressStorePort};
