//! Domain layer - Core game logic with no I/O
//!
//! This layer contains:
//! - Entities: Module, Scenario, BoardLayout, ProgressProfile
//! - Value Objects: identifiers, translation bundles, scoring rules
//! - Domain Services: translation-aware choice building, scoring,
//!   the board state machine, progress aggregation, content validation

pub mod entities;
pub mod services;
pub mod value_objects;
