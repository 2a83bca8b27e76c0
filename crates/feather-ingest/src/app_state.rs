//! Shared application state for the ingest server.

use std::sync::Arc;
use std::time::Duration;

use feather_core::error::Result;

use crate::config::IngestConfig;
use crate::handler::{IngestHandler, IngestService};
use crate::obs::{IngestMetrics, MetricsStore};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    service: Arc<dyn IngestService>,
}

struct AppStateInner {
    cfg: IngestConfig,
    metrics: Arc<MetricsStore>,
}

impl AppState {
    /// Build the default stack: a fresh metrics store and an `IngestHandler`
    /// using `server.work_delay_ms`.
    pub fn new(cfg: IngestConfig) -> Result<Self> {
        let store = Arc::new(MetricsStore::new());
        let metrics = IngestMetrics::register(&store)?;
        let handler = IngestHandler::new(Duration::from_millis(cfg.server.work_delay_ms), metrics);

        Ok(Self::with_service(cfg, store, Arc::new(handler)))
    }

    /// Build state around an arbitrary service implementation.
    pub fn with_service(
        cfg: IngestConfig,
        metrics: Arc<MetricsStore>,
        service: Arc<dyn IngestService>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner { cfg, metrics }),
            service,
        }
    }

    pub fn cfg(&self) -> &IngestConfig {
        &self.inner.cfg
    }

    pub fn metrics(&self) -> Arc<MetricsStore> {
        Arc::clone(&self.inner.metrics)
    }

    pub fn service(&self) -> Arc<dyn IngestService> {
        Arc::clone(&self.service)
    }
}
