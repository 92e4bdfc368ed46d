//! Shared application state.
//!
//! The registry is created by the caller and injected here; the state only
//! registers the service's own instruments on it.

use std::sync::Arc;

use pulse_core::error::Result;
use pulse_core::metrics::Registry;

use crate::config::ServiceConfig;
use crate::obs::metrics::AppMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ServiceConfig,
    registry: Arc<Registry>,
    metrics: AppMetrics,
}

impl AppState {
    /// Build application state and register the service metrics on `registry`.
    pub fn new(cfg: ServiceConfig, registry: Arc<Registry>) -> Result<Self> {
        let metrics = AppMetrics::register(&registry)?;
        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                registry,
                metrics,
            }),
        })
    }

    pub fn cfg(&self) -> &ServiceConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    pub fn metrics(&self) -> &AppMetrics {
        &self.inner.metrics
    }
}
