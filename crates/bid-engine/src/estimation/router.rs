use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::TenderPricingInput;
use super::EstimationEngine;

/// Router builder exposing the estimation engine over JSON.
pub fn estimation_router(engine: Arc<EstimationEngine>) -> Router {
    Router::new()
        .route("/api/v1/bids/estimate", post(estimate_handler))
        .route("/api/v1/bids/estimate/batch", post(batch_handler))
        .route("/api/v1/bids/rate-table", get(rate_table_handler))
        .with_state(engine)
}

pub(crate) async fn estimate_handler(
    State(engine): State<Arc<EstimationEngine>>,
    axum::Json(input): axum::Json<TenderPricingInput>,
) -> Response {
    match engine.estimate(&input) {
        Ok(estimate) => (StatusCode::OK, axum::Json(estimate)).into_response(),
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn batch_handler(
    State(engine): State<Arc<EstimationEngine>>,
    axum::Json(inputs): axum::Json<Vec<TenderPricingInput>>,
) -> Response {
    let outcomes = engine.estimate_batch(&inputs);
    (StatusCode::OK, axum::Json(outcomes)).into_response()
}

pub(crate) async fn rate_table_handler(State(engine): State<Arc<EstimationEngine>>) -> Response {
    let payload = json!({
        "strategy": engine.strategy_kind(),
        "default_lower_limit_rate": engine.config().default_lower_limit_rate,
        "rate_table": engine.config().rate_table,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}
