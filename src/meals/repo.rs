use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{Meal, MealChanges, NewMeal};
use super::services::DateRange;

const MEAL_COLUMNS: &str =
    "id, user_id, name, calories, protein, carbs, fat, image_url, created_at, updated_at";

pub async fn create(db: &PgPool, user_id: Uuid, meal: &NewMeal) -> anyhow::Result<Meal> {
    let row = sqlx::query_as::<_, Meal>(&format!(
        r#"
        INSERT INTO meals (user_id, name, calories, protein, carbs, fat, image_url)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {MEAL_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(&meal.name)
    .bind(meal.calories)
    .bind(meal.protein)
    .bind(meal.carbs)
    .bind(meal.fat)
    .bind(meal.image_url.as_deref())
    .fetch_one(db)
    .await?;
    Ok(row)
}

/// All meals of a user, newest first, optionally restricted to an inclusive range.
pub async fn list_for_user(
    db: &PgPool,
    user_id: Uuid,
    range: Option<&DateRange>,
) -> anyhow::Result<Vec<Meal>> {
    let (start, end) = match range {
        Some(r) => (Some(r.start), Some(r.end)),
        None => (None, None),
    };
    let rows = sqlx::query_as::<_, Meal>(&format!(
        r#"
        SELECT {MEAL_COLUMNS}
          FROM meals
         WHERE user_id = $1
           AND ($2::timestamptz IS NULL OR created_at >= $2)
           AND ($3::timestamptz IS NULL OR created_at <= $3)
         ORDER BY created_at DESC
        "#
    ))
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn get(db: &PgPool, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<Option<Meal>> {
    let row = sqlx::query_as::<_, Meal>(&format!(
        "SELECT {MEAL_COLUMNS} FROM meals WHERE id = $1 AND user_id = $2 LIMIT 1"
    ))
    .bind(meal_id)
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn update(
    db: &PgPool,
    user_id: Uuid,
    meal_id: Uuid,
    changes: &MealChanges,
) -> anyhow::Result<Option<Meal>> {
    let row = sqlx::query_as::<_, Meal>(&format!(
        r#"
        UPDATE meals
           SET name       = COALESCE($3, name),
               calories   = CASE WHEN $4 THEN $5 ELSE calories END,
               protein    = CASE WHEN $6 THEN $7 ELSE protein END,
               carbs      = CASE WHEN $8 THEN $9 ELSE carbs END,
               fat        = CASE WHEN $10 THEN $11 ELSE fat END,
               updated_at = now()
         WHERE id = $1 AND user_id = $2
        RETURNING {MEAL_COLUMNS}
        "#
    ))
    .bind(meal_id)
    .bind(user_id)
    .bind(changes.name.as_deref())
    .bind(changes.calories.is_some())
    .bind(changes.calories.flatten())
    .bind(changes.protein.is_some())
    .bind(changes.protein.flatten())
    .bind(changes.carbs.is_some())
    .bind(changes.carbs.flatten())
    .bind(changes.fat.is_some())
    .bind(changes.fat.flatten())
    .fetch_optional(db)
    .await?;
    Ok(row)
}

/// Deletes the meal and returns it, so the caller can clean up its image.
pub async fn delete(db: &PgPool, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<Option<Meal>> {
    let row = sqlx::query_as::<_, Meal>(&format!(
        "DELETE FROM meals WHERE id = $1 AND user_id = $2 RETURNING {MEAL_COLUMNS}"
    ))
    .bind(meal_id)
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}
