use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::dto::{
    AnswerView, LikeResponse, NewAnswer, NewQuestion, QuestionView, SearchQuery,
};
use super::repo;
use crate::{
    auth::services::{AuthUser, MaybeAuthUser},
    error::{ApiError, ApiResult},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/qanda/questions", get(list_questions).post(ask_question))
        .route("/qanda/questions/:id/answers", post(add_answer))
        .route("/qanda/answers/:id/like", post(toggle_like))
}

fn non_blank(s: &str, what: &str) -> ApiResult<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        warn!("blank {what}");
        return Err(ApiError::bad_request(format!("{what} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

#[instrument(skip(state))]
pub async fn list_questions(
    State(state): State<AppState>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    Query(q): Query<SearchQuery>,
) -> ApiResult<Json<Vec<QuestionView>>> {
    let search = q.q.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let questions = repo::list_questions(&state.db, search).await?;
    let ids: Vec<Uuid> = questions.iter().map(|q| q.id).collect();
    let answers = repo::answers_for(&state.db, &ids, viewer).await?;

    let now = OffsetDateTime::now_utc();
    let mut by_question: HashMap<Uuid, Vec<AnswerView>> = HashMap::new();
    for a in answers {
        by_question
            .entry(a.question_id)
            .or_default()
            .push(AnswerView::new(a, now));
    }

    let views = questions
        .into_iter()
        .map(|q| {
            let answers = by_question.remove(&q.id).unwrap_or_default();
            QuestionView::new(q, answers, now)
        })
        .collect();
    Ok(Json(views))
}

#[instrument(skip(state, body))]
pub async fn ask_question(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<NewQuestion>,
) -> ApiResult<(StatusCode, Json<QuestionView>)> {
    let content = non_blank(&body.content, "Question")?;
    let title = body
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map_or_else(|| content.clone(), str::to_string);

    let row = repo::create_question(&state.db, user_id, &title, &content).await?;
    info!(%user_id, question_id = %row.id, "question asked");
    Ok((
        StatusCode::CREATED,
        Json(QuestionView::new(row, Vec::new(), OffsetDateTime::now_utc())),
    ))
}

#[instrument(skip(state, body))]
pub async fn add_answer(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(question_id): Path<Uuid>,
    Json(body): Json<NewAnswer>,
) -> ApiResult<(StatusCode, Json<AnswerView>)> {
    let content = non_blank(&body.content, "Answer")?;
    if !repo::question_exists(&state.db, question_id).await? {
        return Err(ApiError::not_found("Question not found"));
    }
    let row = repo::create_answer(&state.db, question_id, user_id, &content).await?;
    info!(%user_id, %question_id, answer_id = %row.id, "answer added");
    Ok((
        StatusCode::CREATED,
        Json(AnswerView::new(row, OffsetDateTime::now_utc())),
    ))
}

#[instrument(skip(state))]
pub async fn toggle_like(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(answer_id): Path<Uuid>,
) -> ApiResult<Json<LikeResponse>> {
    let (likes, liked) = repo::toggle_like(&state.db, answer_id, user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Answer not found"))?;
    Ok(Json(LikeResponse { likes, liked }))
}
