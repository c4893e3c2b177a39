use serde::{Deserialize, Serialize};
use time::{macros::format_description, OffsetDateTime};
use uuid::Uuid;

use super::repo_types::{AnswerRow, QuestionRow};

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewQuestion {
    pub title: Option<String>,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct NewAnswer {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub likes: i64,
    pub liked: bool,
}

#[derive(Debug, Serialize)]
pub struct AnswerView {
    pub id: Uuid,
    pub author: String,
    pub content: String,
    pub likes: i64,
    pub liked_by_me: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub time_ago: String,
}

#[derive(Debug, Serialize)]
pub struct QuestionView {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub time_ago: String,
    pub answers: Vec<AnswerView>,
}

impl AnswerView {
    pub fn new(row: AnswerRow, now: OffsetDateTime) -> Self {
        Self {
            id: row.id,
            author: row.author_email,
            content: row.content,
            likes: row.likes,
            liked_by_me: row.liked_by_me,
            time_ago: relative_time(row.created_at, now),
            created_at: row.created_at,
        }
    }
}

impl QuestionView {
    pub fn new(row: QuestionRow, answers: Vec<AnswerView>, now: OffsetDateTime) -> Self {
        Self {
            id: row.id,
            title: row.title,
            author: row.author_email,
            content: row.content,
            time_ago: relative_time(row.created_at, now),
            created_at: row.created_at,
            answers,
        }
    }
}

/// Short age label: minutes, hours and days up to a week, then the calendar date.
pub fn relative_time(ts: OffsetDateTime, now: OffsetDateTime) -> String {
    let secs = (now - ts).whole_seconds();
    match secs {
        s if s < 60 => "Just now".to_string(),
        s if s < 3_600 => format!("{} minutes ago", s / 60),
        s if s < 86_400 => format!("{} hours ago", s / 3_600),
        s if s < 604_800 => format!("{} days ago", s / 86_400),
        _ => ts
            .format(format_description!(
                "[month repr:short] [day padding:none], [year]"
            ))
            .unwrap_or_else(|_| ts.date().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn labels_by_age() {
        let now = datetime!(2024-06-15 12:00 UTC);
        assert_eq!(relative_time(datetime!(2024-06-15 11:59:30 UTC), now), "Just now");
        assert_eq!(relative_time(datetime!(2024-06-15 11:15 UTC), now), "45 minutes ago");
        assert_eq!(relative_time(datetime!(2024-06-15 07:00 UTC), now), "5 hours ago");
        assert_eq!(relative_time(datetime!(2024-06-12 12:00 UTC), now), "3 days ago");
        assert_eq!(relative_time(datetime!(2024-06-01 08:00 UTC), now), "Jun 1, 2024");
    }

    #[test]
    fn future_timestamps_are_just_now() {
        let now = datetime!(2024-06-15 12:00 UTC);
        assert_eq!(relative_time(datetime!(2024-06-15 12:05 UTC), now), "Just now");
    }

    #[test]
    fn title_is_optional() {
        let q: NewQuestion = serde_json::from_str(r#"{"content":"Best pre-workout meal?"}"#).unwrap();
        assert!(q.title.is_none());
    }
}
