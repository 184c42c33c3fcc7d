use axum::http::Method;
use metrics_exporter_prometheus::PrometheusHandle;
use pump_scorer::config::{CorsConfig, ServiceConfig};
use pump_scorer::scoring::ScorerHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Option<Arc<PrometheusHandle>>,
    pub(crate) scorer: ScorerHandle,
    pub(crate) service: Arc<ServiceConfig>,
}

impl AppState {
    pub(crate) fn new(service: ServiceConfig, scorer: ScorerHandle) -> Self {
        Self {
            readiness: Arc::new(AtomicBool::new(false)),
            metrics: None,
            scorer,
            service: Arc::new(service),
        }
    }

    pub(crate) fn with_metrics(mut self, metrics: PrometheusHandle) -> Self {
        self.metrics = Some(Arc::new(metrics));
        self
    }
}

/// Browser access for the listing dashboard; credentials require explicit origins.
pub(crate) fn cors_layer(config: &CorsConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(config.header_values()))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
