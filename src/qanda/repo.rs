use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{AnswerRow, QuestionRow};

/// `%term%` for ILIKE with the pattern metacharacters escaped.
pub fn like_pattern(term: &str) -> String {
    let mut out = String::with_capacity(term.len() + 2);
    out.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}

pub async fn list_questions(db: &PgPool, search: Option<&str>) -> anyhow::Result<Vec<QuestionRow>> {
    let pattern = search.map(like_pattern);
    let rows = sqlx::query_as::<_, QuestionRow>(
        r#"
        SELECT q.id, u.email AS author_email, q.title, q.content, q.created_at
          FROM questions q
          JOIN users u ON u.id = q.author_id
         WHERE $1::text IS NULL OR q.title ILIKE $1 OR q.content ILIKE $1
         ORDER BY q.created_at DESC
        "#,
    )
    .bind(pattern)
    .fetch_all(db)
    .await
    .context("list questions")?;
    Ok(rows)
}

/// Answers of the given questions, oldest first.
pub async fn answers_for(
    db: &PgPool,
    question_ids: &[Uuid],
    viewer: Option<Uuid>,
) -> anyhow::Result<Vec<AnswerRow>> {
    if question_ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows = sqlx::query_as::<_, AnswerRow>(
        r#"
        SELECT a.id, a.question_id, u.email AS author_email, a.content, a.created_at,
               (SELECT COUNT(*) FROM answer_likes l WHERE l.answer_id = a.id) AS likes,
               EXISTS (SELECT 1 FROM answer_likes l
                        WHERE l.answer_id = a.id AND l.user_id = $2) AS liked_by_me
          FROM answers a
          JOIN users u ON u.id = a.author_id
         WHERE a.question_id = ANY($1)
         ORDER BY a.created_at ASC
        "#,
    )
    .bind(question_ids)
    .bind(viewer)
    .fetch_all(db)
    .await
    .context("list answers")?;
    Ok(rows)
}

pub async fn create_question(
    db: &PgPool,
    author_id: Uuid,
    title: &str,
    content: &str,
) -> anyhow::Result<QuestionRow> {
    let row = sqlx::query_as::<_, QuestionRow>(
        r#"
        WITH q AS (
            INSERT INTO questions (author_id, title, content)
            VALUES ($1, $2, $3)
            RETURNING id, author_id, title, content, created_at
        )
        SELECT q.id, u.email AS author_email, q.title, q.content, q.created_at
          FROM q JOIN users u ON u.id = q.author_id
        "#,
    )
    .bind(author_id)
    .bind(title)
    .bind(content)
    .fetch_one(db)
    .await
    .context("insert question")?;
    Ok(row)
}

pub async fn question_exists(db: &PgPool, question_id: Uuid) -> anyhow::Result<bool> {
    let (exists,): (bool,) =
        sqlx::query_as("SELECT EXISTS (SELECT 1 FROM questions WHERE id = $1)")
            .bind(question_id)
            .fetch_one(db)
            .await
            .context("question exists")?;
    Ok(exists)
}

pub async fn create_answer(
    db: &PgPool,
    question_id: Uuid,
    author_id: Uuid,
    content: &str,
) -> anyhow::Result<AnswerRow> {
    let row = sqlx::query_as::<_, AnswerRow>(
        r#"
        WITH a AS (
            INSERT INTO answers (question_id, author_id, content)
            VALUES ($1, $2, $3)
            RETURNING id, question_id, author_id, content, created_at
        )
        SELECT a.id, a.question_id, u.email AS author_email, a.content, a.created_at,
               0::bigint AS likes, false AS liked_by_me
          FROM a JOIN users u ON u.id = a.author_id
        "#,
    )
    .bind(question_id)
    .bind(author_id)
    .bind(content)
    .fetch_one(db)
    .await
    .context("insert answer")?;
    Ok(row)
}

/// Flips the user's like on an answer. Returns `(likes, liked)` after the flip,
/// or `None` when the answer does not exist.
pub async fn toggle_like(
    db: &PgPool,
    answer_id: Uuid,
    user_id: Uuid,
) -> anyhow::Result<Option<(i64, bool)>> {
    let mut tx = db.begin().await?;

    let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM answers WHERE id = $1)")
        .bind(answer_id)
        .fetch_one(&mut *tx)
        .await
        .context("answer exists")?;
    if !exists {
        return Ok(None);
    }

    let removed = sqlx::query("DELETE FROM answer_likes WHERE answer_id = $1 AND user_id = $2")
        .bind(answer_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .context("remove like")?
        .rows_affected();

    let liked = removed == 0;
    if liked {
        sqlx::query(
            "INSERT INTO answer_likes (answer_id, user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(answer_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .context("add like")?;
    }

    let (likes,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM answer_likes WHERE answer_id = $1")
        .bind(answer_id)
        .fetch_one(&mut *tx)
        .await
        .context("count likes")?;

    tx.commit().await?;
    Ok(Some((likes, liked)))
}
