//! Application layer - Use cases over the domain
//!
//! This layer contains:
//! - Ports: content repository and progress store interfaces
//! - DTOs: wire shapes for content and progress snapshots
//! - Services: content loading with offline fallback, mini-game sessions,
//!   progress recording

pub mod dto;
pub mod ports;
pub mod services;
