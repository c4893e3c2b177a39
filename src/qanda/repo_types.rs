use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct QuestionRow {
    pub id: Uuid,
    pub author_email: String,
    pub title: String,
    pub content: String,
    pub created_at: OffsetDateTime,
}

/// Answer with its like count as seen by one viewer.
#[derive(Debug, Clone, FromRow)]
pub struct AnswerRow {
    pub id: Uuid,
    pub question_id: Uuid,
    pub author_email: String,
    pub content: String,
    pub created_at: OffsetDateTime,
    pub likes: i64,
    pub liked_by_me: bool,
}
