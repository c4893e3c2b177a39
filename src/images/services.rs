use std::time::Duration;

use anyhow::Context;
use tracing::warn;
use uuid::Uuid;

use crate::analysis::dto::UploadedImage;
use crate::state::AppState;

const PRESIGN_TTL: Duration = Duration::from_secs(10 * 60);

/// Stores a meal photo and returns its object key.
pub async fn store_meal_image(
    st: &AppState,
    user_id: Uuid,
    image: &UploadedImage,
) -> anyhow::Result<String> {
    let key = object_key(user_id, Uuid::new_v4(), &image.content_type);
    st.storage
        .put_object(&key, image.body.clone(), &image.content_type)
        .await
        .with_context(|| format!("store meal image {key}"))?;
    Ok(key)
}

pub async fn presign_meal_image(st: &AppState, key: &str) -> anyhow::Result<String> {
    st.storage
        .presign_get(key, PRESIGN_TTL)
        .await
        .with_context(|| format!("presign url for {key}"))
}

/// Best effort: an orphaned object is harmless.
pub async fn discard_meal_image(st: &AppState, key: &str) {
    if let Err(e) = st.storage.delete_object(key).await {
        warn!(error = %e, %key, "meal image cleanup failed");
    }
}

fn object_key(user_id: Uuid, image_id: Uuid, content_type: &str) -> String {
    let ext = ext_from_mime(content_type).unwrap_or("bin");
    format!("meals/{user_id}/{image_id}.{ext}")
}

fn ext_from_mime(ct: &str) -> Option<&'static str> {
    match ct {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/heic" => Some("heic"),
        "image/gif" => Some("gif"),
        _ => None,
    }
}
