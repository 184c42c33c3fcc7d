use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use tracing::{error, warn};

use super::{FactorMap, ScoreResult, ScorerHandle, ScoringError, TokenRecord};
use crate::error::AppError;

/// Wire shape of a successful score.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreResponse {
    pub probability: f64,
    pub explain: String,
    pub factors: FactorMap,
}

impl From<ScoreResult> for ScoreResponse {
    fn from(result: ScoreResult) -> Self {
        Self {
            probability: result.probability,
            explain: result.explanation,
            factors: result.factors,
        }
    }
}

/// Router exposing the scoring endpoint over a shared scorer handle.
pub fn score_router(handle: ScorerHandle) -> Router {
    Router::new()
        .route("/score", post(score_handler))
        .with_state(handle)
}

pub(crate) async fn score_handler(
    State(handle): State<ScorerHandle>,
    Json(record): Json<TokenRecord>,
) -> Result<Json<ScoreResponse>, AppError> {
    let result = score_record(&handle, &record).inspect_err(|err| {
        if err.status_code().is_server_error() {
            error!(error = %err, token = %record.name, "scoring request failed");
        } else {
            warn!(error = %err, token = %record.name, "scoring request rejected");
        }
    })?;

    Ok(Json(ScoreResponse::from(result)))
}

fn score_record(handle: &ScorerHandle, record: &TokenRecord) -> Result<ScoreResult, ScoringError> {
    let scorer = handle.get()?;
    record.validate()?;
    scorer.try_score(record)
}

impl ScoringError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ScoringError::NotReady => StatusCode::SERVICE_UNAVAILABLE,
            ScoringError::InvalidRecord { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ScoringError::NonFinite { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
