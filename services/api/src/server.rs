use crate::cli::ServeArgs;
use crate::infra::{cors_layer, AppState};
use crate::routes::with_service_routes;
use axum_prometheus::PrometheusMetricLayer;
use pump_scorer::config::AppConfig;
use pump_scorer::error::AppError;
use pump_scorer::scoring::{ScorerHandle, TokenScorer};
use pump_scorer::telemetry;
use std::sync::atomic::Ordering;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let scorer = ScorerHandle::empty();
    let app_state =
        AppState::new(config.service.clone(), scorer.clone()).with_metrics(prometheus_handle);
    let readiness_flag = app_state.readiness.clone();

    let app = with_service_routes(app_state)
        .layer(cors_layer(&config.cors))
        .layer(TraceLayer::new_for_http())
        .layer(prometheus_layer);

    info!("initializing token scorer");
    if !scorer.install(TokenScorer::new()) {
        warn!("token scorer was already installed");
    }
    info!("token scorer ready");

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        origins = ?config.cors.allowed_origins,
        "{} ready",
        config.service.name
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("scoring service shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "unable to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
