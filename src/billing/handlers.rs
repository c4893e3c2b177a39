use axum::{
    extract::{Query, State},
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use super::dto::{CheckoutCompleteQuery, CheckoutRequestBody, CheckoutResponse, PricingPlan};
use super::services::{complete_checkout, load_pricing, start_checkout};
use super::stripe::is_checkout_session_id;
use crate::{
    auth::services::AuthUser,
    error::{ApiError, ApiResult},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/pricing", get(pricing))
        .route("/billing/checkout", post(checkout))
        .route("/billing/checkout/complete", get(checkout_complete))
}

#[instrument(skip(state))]
pub async fn pricing(State(state): State<AppState>) -> ApiResult<Json<Vec<PricingPlan>>> {
    let plans = load_pricing(&state).await.map_err(|e| {
        error!(error = %e, "load pricing failed");
        ApiError::Upstream("Pricing is unavailable".into())
    })?;
    Ok(Json(plans))
}

#[instrument(skip(state, body))]
pub async fn checkout(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<CheckoutRequestBody>,
) -> ApiResult<Json<CheckoutResponse>> {
    let price_id = body.price_id.trim();
    if price_id.is_empty() {
        warn!(%user_id, "checkout without price");
        return Err(ApiError::bad_request("price_id is required"));
    }
    let url = start_checkout(&state, user_id, price_id).await.map_err(|e| {
        error!(error = %e, %user_id, "create checkout session failed");
        ApiError::Upstream("Could not start checkout".into())
    })?;
    info!(%user_id, %price_id, "checkout started");
    Ok(Json(CheckoutResponse { url }))
}

/// Landing URL after the hosted checkout; always redirects back into the app.
#[instrument(skip(state))]
pub async fn checkout_complete(
    State(state): State<AppState>,
    Query(q): Query<CheckoutCompleteQuery>,
) -> Redirect {
    let Some(session_id) = q.session_id.filter(|s| !s.is_empty()) else {
        return Redirect::to("/pricing");
    };
    if !is_checkout_session_id(&session_id) {
        warn!(%session_id, "malformed checkout session id");
        return Redirect::to("/pricing");
    }
    match complete_checkout(&state, &session_id).await {
        Ok(()) => Redirect::to("/dashboard"),
        Err(e) => {
            error!(error = %e, %session_id, "checkout completion failed");
            Redirect::to("/error")
        }
    }
}
