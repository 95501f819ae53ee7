//! Application state for the debt map API.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::ServiceConfig;
use crate::fetcher::SeriesFetcher;
use crate::source::IndicatorSource;

/// Shared application state.
///
/// Holds no data between requests: every dashboard request is its own
/// refresh cycle.
pub struct AppState {
    /// Raw upstream access, used by the proxy routes.
    pub source: Arc<dyn IndicatorSource>,

    /// Validated, all-or-nothing access, used by the dashboard routes.
    pub fetcher: SeriesFetcher,

    pub config: ServiceConfig,

    /// Present when the binary installed a recorder.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(source: Arc<dyn IndicatorSource>, config: ServiceConfig) -> Self {
        Self {
            fetcher: SeriesFetcher::new(Arc::clone(&source)),
            source,
            config,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
