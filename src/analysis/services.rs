use tracing::{error, info, warn};
use uuid::Uuid;

use super::dto::{ActionResult, AnalyzedMeal, UploadedImage};
use super::error::AnalyzeError;
use super::parse::{parse_analysis, FoodAnalysis};
use crate::{
    images::services::store_meal_image,
    meals::{repo as meals_repo, repo_types::NewMeal},
    state::AppState,
    teams::{repo_types::ActivityType, services::record_activity},
};

/// Analyze a food photo and record it as a meal. Every failure is folded into the result.
pub async fn analyze_food(
    st: &AppState,
    user_id: Option<Uuid>,
    image: Option<UploadedImage>,
    ip_address: Option<&str>,
) -> ActionResult<AnalyzedMeal> {
    match run(st, user_id, image, ip_address).await {
        Ok(meal) => ActionResult::ok(meal),
        Err(e) => {
            match &e {
                AnalyzeError::Unauthenticated | AnalyzeError::MissingImage => {
                    warn!(error = %e, "analysis rejected")
                }
                _ => error!(error = %e, user_id = ?user_id, "analysis failed"),
            }
            ActionResult::failed(e.to_string())
        }
    }
}

async fn run(
    st: &AppState,
    user_id: Option<Uuid>,
    image: Option<UploadedImage>,
    ip_address: Option<&str>,
) -> Result<AnalyzedMeal, AnalyzeError> {
    let user_id = user_id.ok_or(AnalyzeError::Unauthenticated)?;
    let image = image
        .filter(|img| !img.body.is_empty())
        .ok_or(AnalyzeError::MissingImage)?;

    let text = st.analyzer.describe(&image.body, &image.content_type).await?;
    let analysis = parse_analysis(&text)?;

    let image_url = match store_meal_image(st, user_id, &image).await {
        Ok(key) => Some(key),
        Err(e) => {
            warn!(error = %e, %user_id, "saving meal without image");
            None
        }
    };

    let meal = meals_repo::create(&st.db, user_id, &new_meal(analysis, image_url))
        .await
        .map_err(AnalyzeError::Persistence)?;
    info!(%user_id, meal_id = %meal.id, name = %meal.name, "meal analyzed");

    record_activity(st, user_id, ActivityType::AnalyzeMeal, ip_address).await;
    Ok(AnalyzedMeal::from(&meal))
}

fn new_meal(a: FoodAnalysis, image_url: Option<String>) -> NewMeal {
    NewMeal {
        name: a.name,
        calories: a.calories,
        protein: a.protein,
        carbs: a.carbs,
        fat: a.fat,
        image_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::gemini::NutritionAnalyzer;
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::sync::Arc;

    enum Script {
        Text(&'static str),
        Status(u16, &'static str),
    }

    struct ScriptedAnalyzer(Script);

    #[async_trait]
    impl NutritionAnalyzer for ScriptedAnalyzer {
        async fn describe(&self, _image: &[u8], _mime: &str) -> Result<String, AnalyzeError> {
            match &self.0 {
                Script::Text(t) => Ok(t.to_string()),
                Script::Status(status, reason) => Err(AnalyzeError::UpstreamStatus {
                    status: *status,
                    reason: reason.to_string(),
                }),
            }
        }
    }

    fn state(script: Script) -> AppState {
        AppState::fake().with_analyzer(Arc::new(ScriptedAnalyzer(script)))
    }

    fn jpeg() -> Option<UploadedImage> {
        Some(UploadedImage {
            body: Bytes::from_static(b"\xff\xd8\xff\xe0"),
            content_type: "image/jpeg".into(),
        })
    }

    async fn error_of(st: &AppState, user: Option<Uuid>, image: Option<UploadedImage>) -> String {
        let res = analyze_food(st, user, image, None).await;
        assert!(!res.success);
        assert!(res.data.is_none());
        res.error.expect("error message")
    }

    #[tokio::test]
    async fn requires_a_user() {
        let st = state(Script::Text("{}"));
        assert_eq!(error_of(&st, None, jpeg()).await, "User not authenticated");
    }

    #[tokio::test]
    async fn requires_an_image() {
        let st = state(Script::Text("{}"));
        let user = Some(Uuid::new_v4());
        assert_eq!(error_of(&st, user, None).await, "No image file provided");

        let empty = Some(UploadedImage {
            body: Bytes::new(),
            content_type: "image/png".into(),
        });
        assert_eq!(error_of(&st, user, empty).await, "No image file provided");
    }

    #[tokio::test]
    async fn upstream_failure_is_reported() {
        let st = state(Script::Status(500, "Internal Server Error"));
        assert_eq!(
            error_of(&st, Some(Uuid::new_v4()), jpeg()).await,
            "API request failed: 500 Internal Server Error"
        );
    }

    #[tokio::test]
    async fn answer_without_object_is_reported() {
        let st = state(Script::Text("I cannot identify this food."));
        assert_eq!(
            error_of(&st, Some(Uuid::new_v4()), jpeg()).await,
            "API response does not contain a valid JSON object"
        );
    }

    #[tokio::test]
    async fn wrong_shape_is_reported() {
        let st = state(Script::Text(
            r#"Sure! {"name": "Salad", "calories": "about 200", "macros": {"protein": 3, "carbs": 10, "fat": 1}}"#,
        ));
        let err = error_of(&st, Some(Uuid::new_v4()), jpeg()).await;
        assert!(err.contains("calories: expected number or null"), "{err}");
    }

    #[test]
    fn analysis_maps_onto_new_meal() {
        let meal = new_meal(
            FoodAnalysis {
                name: "Ramen".into(),
                calories: Some(650.0),
                protein: Some(25.0),
                carbs: None,
                fat: Some(20.0),
            },
            Some("meals/u/i.jpg".into()),
        );
        assert_eq!(meal.name, "Ramen");
        assert_eq!(meal.carbs, None);
        assert_eq!(meal.image_url.as_deref(), Some("meals/u/i.jpg"));
    }
}
