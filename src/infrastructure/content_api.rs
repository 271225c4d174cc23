//! HTTP client for the content API

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;

use crate::application::dto::{ModuleListDto, ScenarioDto};
use crate::application::ports::outbound::{ContentRepositoryPort, RepositoryError};
use crate::domain::entities::{Module, Scenario};
use crate::domain::value_objects::ModuleId;

/// Content repository backed by the REST content API
pub struct HttpContentRepository {
    client: Client,
    base_url: String,
}

impl HttpContentRepository {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build content API client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_text(&self, path: &str) -> Result<String, RepositoryError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RepositoryError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RepositoryError::Unavailable(format!("GET {} returned {}", url, status)));
        }

        response
            .text()
            .await
            .map_err(|e| RepositoryError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl ContentRepositoryPort for HttpContentRepository {
    async fn load_modules(&self) -> Result<Vec<Module>, RepositoryError> {
        let body = self.get_text("/modules").await?;
        parse_modules(&body)
    }

    async fn load_scenarios(&self, module_id: &ModuleId) -> Result<Vec<Scenario>, RepositoryError> {
        let body = self
            .get_text(&format!("/scenarios/module/{}", module_id))
            .await?;
        parse_scenarios(&body, module_id)
    }
}

fn parse_modules(body: &str) -> Result<Vec<Module>, RepositoryError> {
    let list: ModuleListDto =
        serde_json::from_str(body).map_err(|e| RepositoryError::InvalidPayload(e.to_string()))?;
    Ok(list.into_modules())
}

fn parse_scenarios(body: &str, module_id: &ModuleId) -> Result<Vec<Scenario>, RepositoryError> {
    let dtos: Vec<ScenarioDto> =
        serde_json::from_str(body).map_err(|e| RepositoryError::InvalidPayload(e.to_string()))?;
    Ok(dtos
        .into_iter()
        .map(|dto| dto.into_scenario(Some(module_id)))
        .collect())
}
