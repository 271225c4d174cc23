//! HTTP client for the progress API

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};

use crate::application::dto::ProgressSnapshotDto;
use crate::application::ports::outbound::{ProgressStoreError, ProgressStorePort};
use crate::domain::entities::ProgressProfile;

/// Progress store backed by `GET/PUT {base}/progress`
pub struct HttpProgressStore {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl HttpProgressStore {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build progress API client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token: None,
        })
    }

    pub fn with_auth_token(mut self, token: Option<String>) -> Self {
        self.auth_token = token.filter(|t| !t.is_empty());
        self
    }

    fn url(&self) -> String {
        format!("{}/progress", self.base_url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ProgressStoreError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| ProgressStoreError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProgressStoreError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl ProgressStorePort for HttpProgressStore {
    async fn fetch_profile(&self) -> Result<ProgressProfile, ProgressStoreError> {
        let response = self.send(self.client.get(self.url())).await?;
        let snapshot: ProgressSnapshotDto = response
            .json()
            .await
            .map_err(|e| ProgressStoreError::InvalidPayload(e.to_string()))?;
        Ok(snapshot.into())
    }

    async fn save_profile(&self, profile: &ProgressProfile) -> Result<(), ProgressStoreError> {
        let snapshot = ProgressSnapshotDto::from(profile);
        self.send(self.client.put(self.url()).json(&snapshot)).await?;
        Ok(())
    }
}
