use crate::auth::repo_types::User;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// True when `e` wraps a Postgres unique-constraint violation.
pub fn is_unique_violation(e: &anyhow::Error) -> bool {
    match e.downcast_ref::<sqlx::Error>() {
        Some(sqlx::Error::Database(db)) => db.is_unique_violation(),
        _ => false,
    }
}

const USER_COLUMNS: &str = "id, email, password_hash, created_at, updated_at, deleted_at";

impl User {
    /// Find an active (not soft-deleted) user by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND deleted_at IS NULL"
        ))
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Find an active user by id.
    pub async fn find_active(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL LIMIT 1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a new user with hashed password.
    pub async fn create(
        conn: &mut PgConnection,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(email)
        .bind(password_hash)
        .fetch_one(conn)
        .await?;
        Ok(user)
    }

    /// Mark the account deleted and free its email for re-registration.
    pub async fn soft_delete(conn: &mut PgConnection, id: Uuid) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE users
               SET deleted_at = now(),
                   updated_at = now(),
                   email = email || '-' || id::text || '-deleted'
             WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .execute(conn)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod repo_tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::{borrow::Cow, error::Error as StdError, fmt};

    #[derive(Debug)]
    struct DuplicateEmail;

    impl fmt::Display for DuplicateEmail {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("duplicate key value violates unique constraint \"users_email_key\"")
        }
    }

    impl StdError for DuplicateEmail {}

    impl DatabaseError for DuplicateEmail {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed("23505"))
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            ErrorKind::UniqueViolation
        }
    }

    #[test]
    fn detects_unique_violations_only() {
        let dup = anyhow::Error::from(sqlx::Error::Database(Box::new(DuplicateEmail)));
        assert!(is_unique_violation(&dup));

        assert!(!is_unique_violation(&anyhow::Error::from(sqlx::Error::RowNotFound)));
        assert!(!is_unique_violation(&anyhow::anyhow!("connection reset")));
    }
}
