use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{
    category::Category,
    dto::UploadResponse,
    repo::Image,
    services::{self, UploadItem},
};
use crate::{auth::extractors::AdminUser, error::ApiError, state::AppState};

const MAX_BATCH_FILES: usize = 10;

pub fn asset_routes() -> Router<AppState> {
    Router::new()
        .route("/images", post(upload_images))
        // GET and DELETE share the parameter segment because the router
        // refuses two parameter names at the same position.
        .route("/images/:key", get(list_images).delete(delete_image))
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024)) // 20MB
}

#[instrument(skip(state))]
pub async fn list_images(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<Image>>, ApiError> {
    let category = match category.parse::<Category>() {
        Ok(c) => c,
        Err(_) => {
            warn!(category = %category, "list with invalid category");
            return Err(ApiError::validation("Invalid category"));
        }
    };

    let images = Image::list_by_category(&state.db, category).await?;
    Ok(Json(images))
}

#[instrument(skip(state, admin, multipart))]
pub async fn upload_images(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut category_raw: Option<String> = None;
    let mut items: Vec<UploadItem> = Vec::new();

    // The category field may arrive after the files, so drain the whole
    // stream before validating.
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(e.to_string()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("category") => {
                category_raw = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::validation(e.to_string()))?,
                );
            }
            Some("images") | Some("images[]") => {
                if items.len() >= MAX_BATCH_FILES {
                    warn!(limit = MAX_BATCH_FILES, "too many files in batch");
                    return Err(ApiError::validation("Too many files"));
                }
                let original_name = field
                    .file_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| "file".into());
                let body = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::validation(e.to_string()))?;
                items.push(UploadItem {
                    original_name,
                    body,
                });
            }
            _ => {}
        }
    }

    let category = category_raw
        .as_deref()
        .and_then(|c| c.parse::<Category>().ok())
        .ok_or_else(|| {
            warn!("upload with invalid category");
            ApiError::validation("Invalid category")
        })?;

    let outcome = services::upload_batch(&state, category, items).await?;
    info!(
        admin = %admin.id,
        category = %category,
        created = outcome.created.len(),
        failed = outcome.failed.len(),
        "images uploaded"
    );

    Ok(Json(UploadResponse {
        message: "Images uploaded successfully".into(),
        images: outcome.created,
        failed: outcome.failed,
    }))
}

#[instrument(skip(state, admin))]
pub async fn delete_image(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = Uuid::parse_str(&id).map_err(|_| ApiError::validation("Invalid image id"))?;

    let image = services::delete_asset(&state, id).await?;
    info!(admin = %admin.id, id = %id, key = %image.storage_key, "image deleted");

    Ok(Json(serde_json::json!({ "message": "Deleted successfully" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repo::{Role, User};
    use time::OffsetDateTime;

    fn admin() -> AdminUser {
        AdminUser(User {
            id: Uuid::new_v4(),
            name: "Admin".into(),
            email: "admin@example.com".into(),
            password_hash: "hash".into(),
            role: Role::Admin,
            created_at: OffsetDateTime::now_utc(),
        })
    }

    #[tokio::test]
    async fn list_rejects_unknown_category() {
        let state = AppState::fake();
        let err = list_images(State(state), Path("garden".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn delete_rejects_malformed_id() {
        let state = AppState::fake();
        let err = delete_image(State(state), admin(), Path("not-a-uuid".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
