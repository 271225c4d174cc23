//! Application configuration

use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::domain::value_objects::LanguageCode;

const ENV_PREFIX: &str = "LEGALQUEST";
const CONFIG_FILE: &str = "legalquest";

/// Application configuration: defaults, then `legalquest.toml`, then
/// `LEGALQUEST_*` environment variables
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Base URL of the content API (`/modules`, `/scenarios/module/{id}`)
    pub content_api_url: String,
    /// Base URL of the progress API (`/progress`)
    pub progress_api_url: String,
    /// Bearer token sent with progress requests
    #[serde(default)]
    pub auth_token: Option<String>,

    pub request_timeout_secs: u64,
    pub default_language: String,
    /// Scenario fetches in flight while loading the catalog
    pub fetch_concurrency: usize,

    /// Seed for dice, shuffles and spins
    #[serde(default)]
    pub rng_seed: Option<u64>,
    pub snap_deck_size: usize,
}

impl AppConfig {
    /// Load configuration from the optional file and environment variables
    pub fn from_env() -> Result<Self> {
        let settings = Config::builder()
            .set_default("content_api_url", "http://localhost:3000/api")?
            .set_default("progress_api_url", "http://localhost:3000/api")?
            .set_default("request_timeout_secs", 10)?
            .set_default("default_language", "en")?
            .set_default("fetch_concurrency", 1)?
            .set_default("snap_deck_size", 10)?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .context("Failed to read configuration")?;

        let config: Self = settings
            .try_deserialize()
            .context("Configuration values are invalid")?;
        anyhow::ensure!(
            config.request_timeout_secs > 0,
            "LEGALQUEST_REQUEST_TIMEOUT_SECS must be greater than zero"
        );
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn language(&self) -> LanguageCode {
        LanguageCode::new(self.default_language.as_str())
    }

    pub fn fetch_concurrency(&self) -> usize {
        self.fetch_concurrency.max(1)
    }
}
