use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// One recorded food entry. Nutrition is `None` when the model could not estimate it.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Meal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub calories: Option<f64>,
    pub protein: Option<f64>, // grams
    pub carbs: Option<f64>,   // grams
    pub fat: Option<f64>,     // grams
    pub image_url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Default)]
pub struct NewMeal {
    pub name: String,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    pub image_url: Option<String>,
}

/// Partial update. Outer `None` leaves a column untouched, `Some(None)` clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MealChanges {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub calories: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    pub protein: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    pub carbs: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    pub fat: Option<Option<f64>>,
}

impl MealChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.calories.is_none()
            && self.protein.is_none()
            && self.carbs.is_none()
            && self.fat.is_none()
    }
}

fn present<'de, D, T>(d: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(d).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_null_differs_from_absent() {
        let c: MealChanges = serde_json::from_str(r#"{"calories": null, "fat": 3.5}"#).unwrap();
        assert_eq!(c.calories, Some(None));
        assert_eq!(c.fat, Some(Some(3.5)));
        assert_eq!(c.protein, None);
        assert!(c.name.is_none());
        assert!(!c.is_empty());

        let empty: MealChanges = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
    }
}
