use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use pump_scorer::scoring::score_router;
use serde_json::json;
use std::sync::atomic::Ordering;

const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

pub(crate) fn with_service_routes(state: AppState) -> Router {
    score_router(state.scorer.clone())
        .route("/", get(root_endpoint))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .layer(Extension(state))
}

pub(crate) async fn root_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<serde_json::Value> {
    Json(json!({
        "service": state.service.name,
        "status": "online",
        "version": SERVICE_VERSION,
    }))
}

pub(crate) async fn healthcheck(Extension(state): Extension<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "scorer_loaded": state.scorer.is_loaded(),
        "debug_mode": state.service.debug,
    }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Acquire) && state.scorer.is_loaded();
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(metrics) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            metrics.render(),
        ),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            String::new(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::cors_layer;
    use axum::body::Body;
    use axum::http::Request;
    use pump_scorer::config::{CorsConfig, ServiceConfig};
    use pump_scorer::scoring::{ScorerHandle, TokenScorer};
    use serde_json::Value;
    use tower::ServiceExt;

    fn service_config() -> ServiceConfig {
        ServiceConfig {
            name: "Solana Token ML Scorer".to_string(),
            debug: true,
        }
    }

    fn ready_state() -> AppState {
        let state = AppState::new(service_config(), ScorerHandle::ready(TokenScorer::new()));
        state.readiness.store(true, Ordering::Release);
        state
    }

    async fn read_json_body(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 4096)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::get(uri).body(Body::empty()).expect("request builds");
        let response = router.oneshot(request).await.expect("router responds");
        let status = response.status();
        (status, read_json_body(response).await)
    }

    #[tokio::test]
    async fn root_reports_service_identity() {
        let (status, body) = get_json(with_service_routes(ready_state()), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "Solana Token ML Scorer");
        assert_eq!(body["status"], "online");
        assert_eq!(body["version"], SERVICE_VERSION);
    }

    #[tokio::test]
    async fn health_reports_scorer_state() {
        let state = AppState::new(service_config(), ScorerHandle::empty());
        let router = with_service_routes(state.clone());

        let (status, body) = get_json(router.clone(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["scorer_loaded"], false);
        assert_eq!(body["debug_mode"], true);

        state.scorer.install(TokenScorer::new());
        let (_, body) = get_json(router, "/health").await;
        assert_eq!(body["scorer_loaded"], true);
    }

    #[tokio::test]
    async fn readiness_waits_for_bind_and_scorer() {
        let state = AppState::new(service_config(), ScorerHandle::ready(TokenScorer::new()));
        let router = with_service_routes(state.clone());

        let (status, body) = get_json(router.clone(), "/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "initializing");

        state.readiness.store(true, Ordering::Release);
        let (status, body) = get_json(router, "/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
    }

    #[tokio::test]
    async fn score_route_is_mounted_alongside_service_routes() {
        let router = with_service_routes(ready_state());
        let payload = r#"{"name": "rug scam honeypot", "rug": {"risk": "high"}}"#;

        let response = router
            .oneshot(
                Request::post("/score")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body["probability"], 0.01);
    }

    #[tokio::test]
    async fn score_route_is_unavailable_until_scorer_installed() {
        let state = AppState::new(service_config(), ScorerHandle::empty());
        let router = with_service_routes(state);

        let response = router
            .oneshot(
                Request::post("/score")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"name": "Token"}"#))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn cors_allows_configured_origin() {
        let cors = CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        };
        let router = with_service_routes(ready_state()).layer(cors_layer(&cors));

        let response = router
            .oneshot(
                Request::get("/health")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .expect("cors header"),
            "http://localhost:3000"
        );
    }
}
