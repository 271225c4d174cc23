//! LegalQuest Engine - scenario engine for constitutional-rights learning games
//!
//! The engine:
//! - Loads localized modules and scenarios, falling back to bundled content
//! - Runs the mini-games: Snakes & Ladders, Scenario Snap, Wheel of Rights,
//!   Writ Quest and module walkthroughs
//! - Folds game results into the user's progress profile and syncs it

pub mod application;
pub mod domain;
pub mod infrastructure;
