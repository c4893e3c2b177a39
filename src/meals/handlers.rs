use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::Redirect,
    routing::get,
    Json, Router,
};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use super::dto::MealRangeQuery;
use super::repo;
use super::repo_types::{Meal, MealChanges};
use super::services::DateRange;
use super::summary::MealSummary;
use crate::{
    auth::services::{client_ip, AuthUser},
    error::{ApiError, ApiResult},
    images::services::{discard_meal_image, presign_meal_image},
    state::AppState,
    teams::{repo_types::ActivityType, services::record_activity},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meals))
        .route("/meals/summary", get(meal_summary))
        .route(
            "/meals/:id",
            get(get_meal).patch(update_meal).delete(delete_meal),
        )
        .route("/meals/:id/photo", get(get_meal_photo))
}

fn range_from(q: &MealRangeQuery) -> ApiResult<Option<DateRange>> {
    DateRange::from_query(q.start_date.as_deref(), q.end_date.as_deref())
        .map_err(|e| ApiError::bad_request(e.to_string()))
}

#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<MealRangeQuery>,
) -> ApiResult<Json<Vec<Meal>>> {
    let range = range_from(&q)?;
    let meals = repo::list_for_user(&state.db, user_id, range.as_ref()).await?;
    Ok(Json(meals))
}

#[instrument(skip(state))]
pub async fn meal_summary(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<MealRangeQuery>,
) -> ApiResult<Json<MealSummary>> {
    let range = range_from(&q)?;
    let meals = repo::list_for_user(&state.db, user_id, range.as_ref()).await?;
    Ok(Json(MealSummary::of(&meals)))
}

#[instrument(skip(state))]
pub async fn get_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Meal>> {
    repo::get(&state.db, user_id, id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Meal not found"))
}

#[instrument(skip(state, headers, changes))]
pub async fn update_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(mut changes): Json<MealChanges>,
) -> ApiResult<Json<Meal>> {
    if let Some(name) = changes.name.as_mut() {
        *name = name.trim().to_string();
        if name.is_empty() {
            return Err(ApiError::bad_request("Meal name cannot be empty"));
        }
    }
    if changes.is_empty() {
        return Err(ApiError::bad_request("Nothing to update"));
    }

    let meal = repo::update(&state.db, user_id, id, &changes)
        .await?
        .ok_or_else(|| ApiError::not_found("Meal not found"))?;

    info!(%user_id, meal_id = %id, "meal updated");
    record_activity(&state, user_id, ActivityType::UpdateMeal, client_ip(&headers).as_deref()).await;
    Ok(Json(meal))
}

#[instrument(skip(state, headers))]
pub async fn delete_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    let meal = repo::delete(&state.db, user_id, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Meal not found"))?;

    if let Some(key) = meal.image_url.as_deref() {
        discard_meal_image(&state, key).await;
    }

    info!(%user_id, meal_id = %id, "meal deleted");
    record_activity(&state, user_id, ActivityType::DeleteMeal, client_ip(&headers).as_deref()).await;
    Ok(StatusCode::NO_CONTENT)
}

/// 307 to a short-lived URL of the stored photo.
#[instrument(skip(state))]
pub async fn get_meal_photo(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Redirect> {
    let meal = repo::get(&state.db, user_id, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Meal not found"))?;

    let Some(key) = meal.image_url else {
        warn!(%user_id, meal_id = %id, "meal has no photo");
        return Err(ApiError::not_found("Photo not found"));
    };

    let url = presign_meal_image(&state, &key).await.map_err(|e| {
        error!(error = %e, %key, "presign failed");
        ApiError::Internal(e)
    })?;
    Ok(Redirect::temporary(&url))
}
