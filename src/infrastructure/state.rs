//! Shared application state

use std::sync::Arc;

use anyhow::Result;

use crate::application::services::{
    session_rng, BoardGameSession, ContentCatalog, ContentService, ModuleWalkthrough,
    ProgressService, SnapQuizSession, WheelSession, WritQuest,
};
use crate::domain::value_objects::{LanguageCode, ModuleId};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::content_api::HttpContentRepository;
use crate::infrastructure::offline_dataset;
use crate::infrastructure::progress_api::HttpProgressStore;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub content_service: ContentService,
    pub progress_service: ProgressService,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        let offline = offline_dataset::load_bundled()?;

        let repository = HttpContentRepository::new(&config.content_api_url, config.request_timeout())?;
        let content_service = ContentService::new(Arc::new(repository), offline)
            .with_fetch_concurrency(config.fetch_concurrency());

        let store = HttpProgressStore::new(&config.progress_api_url, config.request_timeout())?
            .with_auth_token(config.auth_token.clone());
        let progress_service = ProgressService::new(Arc::new(store));

        Ok(Self {
            config,
            content_service,
            progress_service,
        })
    }

    pub fn board_session(&self, catalog: &ContentCatalog, language: LanguageCode) -> BoardGameSession {
        BoardGameSession::new(
            catalog.board.clone(),
            catalog.scenarios.clone(),
            language,
            session_rng(self.config.rng_seed),
        )
    }

    pub fn snap_session(&self, catalog: &ContentCatalog, language: LanguageCode) -> SnapQuizSession {
        SnapQuizSession::new(
            &catalog.scenarios,
            self.config.snap_deck_size,
            language,
            session_rng(self.config.rng_seed),
        )
    }

    pub fn wheel_session(&self, catalog: &ContentCatalog, language: LanguageCode) -> WheelSession {
        WheelSession::new(
            catalog.modules.clone(),
            catalog.scenarios.clone(),
            language,
            session_rng(self.config.rng_seed),
        )
    }

    pub fn writ_quest(&self, catalog: &ContentCatalog, language: LanguageCode) -> WritQuest {
        WritQuest::from_catalog(&catalog.modules, &catalog.scenarios, language)
    }

    /// Walkthrough of one module, `None` if the catalog lacks it
    pub fn walkthrough(
        &self,
        catalog: &ContentCatalog,
        module_id: &ModuleId,
        language: LanguageCode,
    ) -> Option<ModuleWalkthrough> {
        let module = catalog.module(module_id)?;
        let scenarios = catalog.scenarios_for(module);
        Some(ModuleWalkthrough::new(module.clone(), scenarios, language))
    }
}
