//! # Application State
//!
//! Shared state for the Axum application. Cloned into every handler; all
//! fields are cheap to clone.

use metrics_exporter_prometheus::PrometheusHandle;

use certview_core::Certificate;

use crate::config::AppConfig;
use crate::db::LazyPool;
use crate::service::CertificateService;
use crate::store::MemoryStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub certificates: CertificateService,
    /// Prometheus render handle. `None` when no recorder was installed.
    pub metrics: Option<PrometheusHandle>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("certificates", &self.certificates)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

impl AppState {
    /// Empty in-memory state with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Empty in-memory state with the given configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            certificates: CertificateService::in_memory(MemoryStore::new()),
            metrics: None,
        }
    }

    /// In-memory state seeded with `records`, in insertion order.
    pub fn with_records(records: Vec<Certificate>) -> Self {
        Self {
            certificates: CertificateService::in_memory(MemoryStore::with_records(records)),
            ..Self::new()
        }
    }

    /// State backed by PostgreSQL. The pool connects on the first query.
    pub fn with_postgres(config: AppConfig, pool: LazyPool) -> Self {
        Self {
            config,
            certificates: CertificateService::postgres(pool),
            metrics: None,
        }
    }

    /// Attach the Prometheus handle used by `/metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
