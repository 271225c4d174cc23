//! Bundled offline content
//!
//! Parsed through the same DTOs as the content API so both sources
//! normalize identically.

use anyhow::{Context, Result};

use crate::application::dto::OfflineDatasetDto;
use crate::application::services::OfflineContent;
use crate::domain::entities::{BoardLayout, Module, Scenario};

const DATASET: &str = include_str!("../../data/offline_dataset.json");

/// Load the dataset compiled into the binary
pub fn load_bundled() -> Result<OfflineContent> {
    parse(DATASET).context("Bundled offline dataset is invalid")
}

pub fn parse(json: &str) -> Result<OfflineContent> {
    let dto: OfflineDatasetDto = serde_json::from_str(json).context("Malformed offline dataset")?;

    let modules: Vec<Module> = dto.modules.into_iter().map(Module::from).collect();
    let scenarios: Vec<Scenario> = dto
        .scenarios
        .into_iter()
        .map(|s| s.into_scenario(None))
        .collect();
    let board = match dto.board {
        Some(board) => BoardLayout::try_from(board).context("Offline board layout is invalid")?,
        None => BoardLayout::standard(),
    };

    Ok(OfflineContent {
        modules,
        scenarios,
        board,
    })
}
