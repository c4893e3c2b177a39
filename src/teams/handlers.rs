use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use super::repo;
use super::repo_types::{ActivityLog, TeamWithMembers};
use crate::{
    auth::services::AuthUser,
    error::{ApiError, ApiResult},
    state::AppState,
};

const ACTIVITY_PAGE: i64 = 10;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/team", get(get_team))
        .route("/activity", get(list_activity))
}

#[instrument(skip(state))]
pub async fn get_team(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<TeamWithMembers>> {
    repo::get_team_for_user(&state.db, user_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Team not found"))
}

#[instrument(skip(state))]
pub async fn list_activity(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<Vec<ActivityLog>>> {
    let logs = repo::list_activity_logs(&state.db, user_id, ACTIVITY_PAGE).await?;
    Ok(Json(logs))
}
