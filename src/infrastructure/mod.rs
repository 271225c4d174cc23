//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Content API: HTTP adapter for modules and scenarios
//! - Progress API: HTTP adapter for the user's progress profile
//! - Offline dataset: bundled content used when the API is unreachable
//! - Config: Application configuration
//! - State: Shared application state

pub mod config;
pub mod content_api;
pub mod offline_dataset;
pub mod progress_api;
pub mod state;
