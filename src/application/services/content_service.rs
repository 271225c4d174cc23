//! Content Service - Loads modules and scenarios with one fallback policy
//!
//! Every mini-game gets its content through [`ContentService::load_catalog`].
//! A repository failure never reaches the games: the bundled offline dataset
//! is substituted and an advisory notice is attached instead.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures_util::stream::{self, StreamExt};
use tracing::{debug, info, instrument, warn};

use crate::application::ports::outbound::{ContentRepositoryPort, RepositoryError};
use crate::domain::entities::{BoardLayout, Module, Scenario};
use crate::domain::services::validate_catalog;
use crate::domain::value_objects::ModuleId;

pub const OFFLINE_NOTICE: &str = "Using offline data";

/// Bundled content used whenever the repository is unavailable
#[derive(Debug, Clone, PartialEq)]
pub struct OfflineContent {
    pub modules: Vec<Module>,
    pub scenarios: Vec<Scenario>,
    /// Board topology, shared by remote and offline catalogs
    pub board: BoardLayout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    Remote,
    Offline,
}

/// Non-blocking notice for the player that content is degraded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisoryNotice {
    pub message: String,
    pub cause: String,
}

/// Everything a mini-game needs, from whichever source answered
#[derive(Debug, Clone)]
pub struct ContentCatalog {
    pub modules: Vec<Module>,
    pub scenarios: Vec<Scenario>,
    /// Board topology with gates assigned from `scenarios`
    pub board: BoardLayout,
    pub source: ContentSource,
    pub notice: Option<AdvisoryNotice>,
    pub loaded_at: DateTime<Utc>,
}

impl ContentCatalog {
    pub fn module(&self, id: &ModuleId) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == *id)
    }

    /// A module's scenarios in its declared order
    pub fn scenarios_for(&self, module: &Module) -> Vec<Scenario> {
        module
            .scenario_ids
            .iter()
            .filter_map(|id| self.scenarios.iter().find(|s| s.id == *id))
            .cloned()
            .collect()
    }
}

pub struct ContentService {
    repository: Arc<dyn ContentRepositoryPort>,
    offline: OfflineContent,
    fetch_concurrency: usize,
}

impl ContentService {
    pub fn new(repository: Arc<dyn ContentRepositoryPort>, offline: OfflineContent) -> Self {
        Self {
            repository,
            offline,
            fetch_concurrency: 1,
        }
    }

    /// Allow more than one scenario fetch in flight during fan-out
    pub fn with_fetch_concurrency(mut self, fetch_concurrency: usize) -> Self {
        self.fetch_concurrency = fetch_concurrency.max(1);
        self
    }

    pub fn offline(&self) -> &OfflineContent {
        &self.offline
    }

    #[instrument(skip(self))]
    pub async fn load_modules(&self) -> Result<Vec<Module>, RepositoryError> {
        let modules = self.repository.load_modules().await?;
        debug!(count = modules.len(), "Loaded modules");
        Ok(modules)
    }

    #[instrument(skip(self), fields(module_id = %module_id))]
    pub async fn load_scenarios(&self, module_id: &ModuleId) -> Result<Vec<Scenario>, RepositoryError> {
        let scenarios = self.repository.load_scenarios(module_id).await?;
        debug!(count = scenarios.len(), "Loaded scenarios");
        Ok(scenarios)
    }

    /// Scenarios across all modules. A module whose fetch fails is skipped;
    /// only a failed module listing is an error.
    pub async fn load_all_scenarios(&self) -> Result<Vec<Scenario>, RepositoryError> {
        let modules = self.load_modules().await?;
        Ok(self.fan_out(&modules).await)
    }

    /// Load the full catalog, substituting the offline dataset on failure
    #[instrument(skip(self))]
    pub async fn load_catalog(&self) -> ContentCatalog {
        match self.load_remote().await {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!("Content repository failed, using offline dataset: {}", e);
                self.offline_catalog(e)
            }
        }
    }

    async fn load_remote(&self) -> Result<ContentCatalog, RepositoryError> {
        let mut modules = self.load_modules().await?;
        let scenarios = self.fan_out(&modules).await;
        if !modules.is_empty() && scenarios.is_empty() {
            return Err(RepositoryError::Unavailable(format!(
                "no scenarios loaded for any of {} modules",
                modules.len()
            )));
        }
        fill_scenario_ids(&mut modules, &scenarios);

        let board = self.offline.board.clone().assign_scenarios(&scenarios);
        report_issues(&modules, &scenarios, &board);
        info!(
            modules = modules.len(),
            scenarios = scenarios.len(),
            "Loaded remote content catalog"
        );

        Ok(ContentCatalog {
            modules,
            scenarios,
            board,
            source: ContentSource::Remote,
            notice: None,
            loaded_at: Utc::now(),
        })
    }

    fn offline_catalog(&self, cause: RepositoryError) -> ContentCatalog {
        let OfflineContent {
            mut modules,
            scenarios,
            board,
        } = self.offline.clone();
        fill_scenario_ids(&mut modules, &scenarios);
        let board = board.assign_scenarios(&scenarios);

        ContentCatalog {
            modules,
            scenarios,
            board,
            source: ContentSource::Offline,
            notice: Some(AdvisoryNotice {
                message: OFFLINE_NOTICE.to_string(),
                cause: cause.to_string(),
            }),
            loaded_at: Utc::now(),
        }
    }

    /// Fetch each module's scenarios, keeping module order
    async fn fan_out(&self, modules: &[Module]) -> Vec<Scenario> {
        let results: Vec<_> = stream::iter(modules)
            .map(|module| async move {
                (&module.id, self.repository.load_scenarios(&module.id).await)
            })
            .buffered(self.fetch_concurrency)
            .collect()
            .await;

        let mut scenarios = Vec::new();
        for (module_id, result) in results {
            match result {
                Ok(batch) => scenarios.extend(batch),
                Err(e) => warn!(module_id = %module_id, "Skipping module scenarios: {}", e),
            }
        }
        scenarios
    }
}

/// Modules listed without scenario ids get them from the fetched scenarios,
/// ordered by `order_index`.
fn fill_scenario_ids(modules: &mut [Module], scenarios: &[Scenario]) {
    for module in modules.iter_mut().filter(|m| m.scenario_ids.is_empty()) {
        let mut owned: Vec<&Scenario> = scenarios
            .iter()
            .filter(|s| s.module_id == module.id)
            .collect();
        owned.sort_by_key(|s| s.order_index);
        module.scenario_ids = owned.into_iter().map(|s| s.id.clone()).collect();
    }
}

fn report_issues(modules: &[Module], scenarios: &[Scenario], board: &BoardLayout) {
    for issue in validate_catalog(modules, scenarios, board) {
        warn!("Content data-quality issue: {}", issue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;

    use crate::domain::entities::{AnswerOption, BoardTransition, ScenarioTranslation};

    /// In-memory repository; modules listed in `failing` error on scenario fetch
    struct MockRepository {
        modules: Result<Vec<Module>, RepositoryError>,
        scenarios: HashMap<String, Vec<Scenario>>,
        failing: Vec<String>,
    }

    #[async_trait]
    impl ContentRepositoryPort for MockRepository {
        async fn load_modules(&self) -> Result<Vec<Module>, RepositoryError> {
            self.modules.clone()
        }

        async fn load_scenarios(&self, module_id: &ModuleId) -> Result<Vec<Scenario>, RepositoryError> {
            if self.failing.iter().any(|m| m == module_id.as_str()) {
                return Err(RepositoryError::Unavailable("timed out".to_string()));
            }
            Ok(self.scenarios.get(module_id.as_str()).cloned().unwrap_or_default())
        }
    }

    fn scenario(id: &str, module: &str, order: u32) -> Scenario {
        Scenario::new(id, module, "a")
            .with_order(order)
            .with_translation(
                "en",
                ScenarioTranslation {
                    options: vec![AnswerOption::new("a", "yes")],
                    ..Default::default()
                },
            )
    }

    fn offline() -> OfflineContent {
        OfflineContent {
            modules: vec![Module::new("offline-module").with_translation("en", "Offline", "", "")],
            scenarios: vec![scenario("offline_1", "offline-module", 0)],
            board: BoardLayout::new(30, vec![BoardTransition::ladder(3, 12)]).unwrap(),
        }
    }

    fn repository(failing: &[&str]) -> MockRepository {
        let modules = vec![
            Module::new("equality").with_translation("en", "Equality", "", ""),
            Module::new("freedom").with_translation("en", "Freedom", "", ""),
        ];
        let mut scenarios = HashMap::new();
        scenarios.insert(
            "equality".to_string(),
            vec![scenario("eq_2", "equality", 2), scenario("eq_1", "equality", 1)],
        );
        scenarios.insert("freedom".to_string(), vec![scenario("fr_1", "freedom", 1)]);
        MockRepository {
            modules: Ok(modules),
            scenarios,
            failing: failing.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_load_all_scenarios_skips_failed_modules() {
        let service = ContentService::new(Arc::new(repository(&["equality"])), offline());

        let scenarios = service.load_all_scenarios().await.unwrap();
        let ids: Vec<&str> = scenarios.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["fr_1"]);
    }

    #[tokio::test]
    async fn test_load_all_scenarios_keeps_module_order_when_concurrent() {
        let service =
            ContentService::new(Arc::new(repository(&[])), offline()).with_fetch_concurrency(4);

        let scenarios = service.load_all_scenarios().await.unwrap();
        let ids: Vec<&str> = scenarios.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["eq_2", "eq_1", "fr_1"]);
    }

    #[tokio::test]
    async fn test_module_listing_failure_is_an_error() {
        let mut repo = repository(&[]);
        repo.modules = Err(RepositoryError::Unavailable("connection refused".to_string()));
        let service = ContentService::new(Arc::new(repo), offline());

        assert!(matches!(
            service.load_all_scenarios().await,
            Err(RepositoryError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_catalog_from_remote_orders_and_gates() {
        let service = ContentService::new(Arc::new(repository(&[])), offline());

        let catalog = service.load_catalog().await;
        assert_eq!(catalog.source, ContentSource::Remote);
        assert!(catalog.notice.is_none());

        let equality = catalog.module(&"equality".into()).unwrap();
        let ordered: Vec<&str> = equality.scenario_ids.iter().map(|s| s.as_str()).collect();
        assert_eq!(ordered, vec!["eq_1", "eq_2"]);
        assert_eq!(catalog.scenarios_for(equality).len(), 2);

        let gate = catalog.board.transition_from(3).unwrap();
        assert_eq!(gate.scenario_id.as_ref().map(|s| s.as_str()), Some("eq_2"));
    }

    #[tokio::test]
    async fn test_catalog_falls_back_to_offline_with_notice() {
        let mut repo = repository(&[]);
        repo.modules = Err(RepositoryError::Unavailable("timed out".to_string()));
        let service = ContentService::new(Arc::new(repo), offline());

        let catalog = service.load_catalog().await;
        assert_eq!(catalog.source, ContentSource::Offline);
        assert_eq!(catalog.notice.as_ref().map(|n| n.message.as_str()), Some(OFFLINE_NOTICE));
        assert_eq!(catalog.modules[0].id.as_str(), "offline-module");
        assert_eq!(catalog.modules[0].scenario_ids.len(), 1);
    }

    #[tokio::test]
    async fn test_catalog_without_any_scenarios_falls_back() {
        let service = ContentService::new(Arc::new(repository(&["equality", "freedom"])), offline());

        let catalog = service.load_catalog().await;
        assert_eq!(catalog.source, ContentSource::Offline);
        assert_eq!(catalog.scenarios.len(), 1);
        let notice = catalog.notice.unwrap();
        assert!(notice.cause.contains("no scenarios loaded"));
    }
}
