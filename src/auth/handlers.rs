use axum::{
    extract::{FromRef, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, Credentials, PublicUser, RefreshRequest},
        repo::is_unique_violation,
        repo_types::User,
        services::{
            client_ip, hash_password, is_valid_email, normalize_email, verify_password, AuthUser,
            JwtKeys,
        },
    },
    error::{ApiError, ApiResult},
    state::AppState,
    teams::{repo as teams_repo, repo_types::ActivityType, services::record_activity},
};

const MIN_PASSWORD_LEN: usize = 8;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me).delete(delete_me))
}

fn auth_response(keys: &JwtKeys, user: User) -> ApiResult<Json<AuthResponse>> {
    let (access_token, refresh_token) = keys.sign_pair(user.id).map_err(|e| {
        error!(error = %e, user_id = %user.id, "jwt sign failed");
        ApiError::Internal(e)
    })?;
    Ok(Json(AuthResponse {
        access_token,
        refresh_token,
        token_type: "Bearer",
        user: PublicUser {
            id: user.id,
            email: user.email,
        },
    }))
}

#[instrument(skip(state, headers, payload))]
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(mut payload): Json<Credentials>,
) -> ApiResult<Json<AuthResponse>> {
    payload.email = normalize_email(&payload.email);

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::bad_request("Invalid email"));
    }

    if payload.password.len() < MIN_PASSWORD_LEN {
        warn!("password too short");
        return Err(ApiError::bad_request("Password too short"));
    }

    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::Conflict("Email already registered".into()));
    }

    let hash = hash_password(&payload.password)?;
    let ip = client_ip(&headers);

    // user, personal team, membership and audit rows land together
    let mut tx = state.db.begin().await?;
    let user = match User::create(&mut tx, &payload.email, &hash).await {
        Ok(u) => u,
        Err(e) if is_unique_violation(&e) => {
            warn!(email = %payload.email, "email registered concurrently");
            return Err(ApiError::Conflict("Email already registered".into()));
        }
        Err(e) => return Err(e.into()),
    };
    let team = teams_repo::create_team(&mut tx, &format!("{}'s Team", user.email)).await?;
    teams_repo::add_member(&mut tx, user.id, team.id, "owner").await?;
    teams_repo::log_activity(&mut *tx, Some(team.id), user.id, ActivityType::SignUp, ip.as_deref())
        .await?;
    teams_repo::log_activity(
        &mut *tx,
        Some(team.id),
        user.id,
        ActivityType::CreateTeam,
        ip.as_deref(),
    )
    .await?;
    tx.commit().await?;

    info!(user_id = %user.id, email = %user.email, team_id = %team.id, "user registered");
    auth_response(&JwtKeys::from_ref(&state), user)
}

#[instrument(skip(state, headers, payload))]
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(mut payload): Json<Credentials>,
) -> ApiResult<Json<AuthResponse>> {
    payload.email = normalize_email(&payload.email);

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::bad_request("Invalid email"));
    }

    let user = match User::find_by_email(&state.db, &payload.email).await? {
        Some(u) => u,
        None => {
            warn!(email = %payload.email, "login unknown email");
            return Err(ApiError::unauthorized("Invalid credentials"));
        }
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(email = %payload.email, user_id = %user.id, "login invalid password");
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    record_activity(&state, user.id, ActivityType::SignIn, client_ip(&headers).as_deref()).await;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    auth_response(&JwtKeys::from_ref(&state), user)
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys.verify_refresh(&payload.refresh_token).map_err(|e| {
        warn!(error = %e, "refresh rejected");
        ApiError::unauthorized(e.to_string())
    })?;

    let user = User::find_active(&state.db, claims.sub)
        .await?
        .ok_or_else(|| ApiError::unauthorized("User not found"))?;

    auth_response(&keys, user)
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<PublicUser>> {
    let user = User::find_active(&state.db, user_id).await?.ok_or_else(|| {
        warn!(user_id = %user_id, "user not found");
        ApiError::unauthorized("User not found")
    })?;

    Ok(Json(PublicUser {
        id: user.id,
        email: user.email,
    }))
}

#[instrument(skip(state, headers))]
pub async fn delete_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    if User::find_active(&state.db, user_id).await?.is_none() {
        return Err(ApiError::unauthorized("User not found"));
    }

    let team_id = teams_repo::team_id_for_user(&state.db, user_id).await?;
    let ip = client_ip(&headers);

    let mut tx = state.db.begin().await?;
    teams_repo::log_activity(&mut *tx, team_id, user_id, ActivityType::DeleteAccount, ip.as_deref())
        .await?;
    User::soft_delete(&mut tx, user_id).await?;
    teams_repo::remove_memberships(&mut tx, user_id).await?;
    tx.commit().await?;

    info!(%user_id, "account deleted");
    Ok(StatusCode::NO_CONTENT)
}
