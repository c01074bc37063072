//! Application startup sequencing
//!
//! The process entry point owns an [`InitFlag`] and calls [`init_logging`]
//! and [`AppContext::start`] exactly once. The run-once guard is passed
//! explicitly by the caller instead of being held as module state, and the
//! storage backend is selected here, once, from configuration.

use std::sync::Arc;

use tracing::info;

use crate::application::services::{DisplayDataService, MeterTrackingService, ProjectionService};
use crate::config::{AppConfig, StorageBackendKind};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::infrastructure::storage::{InMemoryStorage, JsonFileStorage};

/// Run-once guard owned by the process entry point
#[derive(Debug, Default)]
pub struct InitFlag {
    started: bool,
}

impl InitFlag {
    pub fn new() -> Self {
        Self::default()
    }

    fn mark_started(&mut self) -> DomainResult<()> {
        if self.started {
            return Err(DomainError::Validation(
                "application already started".to_string(),
            ));
        }
        self.started = true;
        Ok(())
    }
}

/// Install the tracing subscriber with the configured level.
///
/// RUST_LOG takes precedence over the configured level. Must be called at
/// most once per process.
pub fn init_logging(config: &AppConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .init();
}

/// Select the storage backend from configuration.
pub fn build_repositories(config: &AppConfig) -> DomainResult<Arc<dyn RepositoryProvider>> {
    match config.storage.backend {
        StorageBackendKind::Memory => Ok(Arc::new(InMemoryStorage::new())),
        StorageBackendKind::File => Ok(Arc::new(JsonFileStorage::open(&config.storage.path)?)),
    }
}

/// Wired application services
pub struct AppContext {
    pub repos: Arc<dyn RepositoryProvider>,
    pub tracking: Arc<MeterTrackingService>,
    pub projections: Arc<ProjectionService>,
    pub display_data: Arc<DisplayDataService>,
}

impl AppContext {
    /// Wire repositories and services from configuration.
    ///
    /// `flag` must be owned by the entry point; a second call with the same
    /// flag fails instead of silently re-initializing.
    pub fn start(config: &AppConfig, flag: &mut InitFlag) -> DomainResult<Self> {
        flag.mark_started()?;

        let repos = build_repositories(config)?;
        info!(backend = ?config.storage.backend, "Storage backend initialized");

        Ok(Self {
            tracking: Arc::new(MeterTrackingService::new(repos.clone())),
            projections: Arc::new(ProjectionService::new(repos.clone())),
            display_data: Arc::new(DisplayDataService::new(repos.clone())),
            repos,
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────
