//! Data Transfer Objects - For collaborator boundaries
//!
//! DTOs live in the application layer so adapters can deserialize backend
//! payloads without leaking transport field names into the domain model.

pub mod content;
pub mod progress;

pub use content::*;
pub use progress::*;
