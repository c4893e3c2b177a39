use axum::{
    extract::Path,
    routing::{get, post},
    Json, Router,
};
use tracing::{instrument, warn};

use super::calculator::{estimate, CalculatorInput, EnergyEstimate};
use super::goals::{Goal, Suggestion};
use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/calculator", post(calculate))
        .route("/suggestions/:goal", get(suggestions))
}

#[instrument]
pub async fn calculate(Json(input): Json<CalculatorInput>) -> ApiResult<Json<EnergyEstimate>> {
    estimate(&input).map(Json).map_err(|e| {
        warn!(error = %e, "rejected calculator input");
        ApiError::bad_request(e.to_string())
    })
}

#[instrument]
pub async fn suggestions(Path(goal): Path<String>) -> ApiResult<Json<Suggestion>> {
    let goal = goal.parse::<Goal>().map_err(|e| {
        warn!(error = %e, "rejected goal");
        ApiError::bad_request(e.to_string())
    })?;
    Ok(Json(goal.suggestion()))
}
