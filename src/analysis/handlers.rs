use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    http::HeaderMap,
    routing::post,
    Json, Router,
};
use tracing::{instrument, warn};

use super::dto::{ActionResult, AnalyzedMeal, UploadedImage};
use super::services::analyze_food;
use crate::{
    auth::services::{client_ip, MaybeAuthUser},
    state::AppState,
};

const MAX_UPLOAD: usize = 20 * 1024 * 1024;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/meals/analyze", post(analyze_meal))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD))
}

/// POST /meals/analyze (multipart, field `image`).
/// Always 200; the outcome is in the `success` flag.
#[instrument(skip(state, headers, mp))]
pub async fn analyze_meal(
    State(state): State<AppState>,
    MaybeAuthUser(user_id): MaybeAuthUser,
    headers: HeaderMap,
    mp: Result<Multipart, MultipartRejection>,
) -> Json<ActionResult<AnalyzedMeal>> {
    let image = match mp {
        Ok(mp) => read_image(mp).await,
        Err(e) => {
            warn!(error = %e, "request is not a multipart form");
            None
        }
    };
    let ip = client_ip(&headers);
    Json(analyze_food(&state, user_id, image, ip.as_deref()).await)
}

async fn read_image(mut mp: Multipart) -> Option<UploadedImage> {
    loop {
        let field = match mp.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "malformed multipart body");
                return None;
            }
        };
        if field.name() != Some("image") {
            continue;
        }
        let content_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| "image/jpeg".into());
        return match field.bytes().await {
            Ok(body) => Some(UploadedImage { body, content_type }),
            Err(e) => {
                warn!(error = %e, "failed to read image field");
                None
            }
        };
    }
}
