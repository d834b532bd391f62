use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{CreateServiceRequest, UpdateServiceRequest},
    repo::Service,
};
use crate::{
    auth::extractors::AdminUser,
    error::{required_field, ApiError},
    state::AppState,
};

pub fn service_routes() -> Router<AppState> {
    Router::new()
        .route("/services", get(list_services).post(create_service))
        .route("/services/:id", put(update_service).delete(delete_service))
}

#[instrument(skip(state))]
pub async fn list_services(State(state): State<AppState>) -> Result<Json<Vec<Service>>, ApiError> {
    let services = Service::list_active(&state.db).await?;
    Ok(Json(services))
}

#[instrument(skip(state, admin, payload))]
pub async fn create_service(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(payload): Json<CreateServiceRequest>,
) -> Result<(StatusCode, Json<Service>), ApiError> {
    let title = required_field(payload.title, "Title, description and image are required")?;
    let description = required_field(
        payload.description,
        "Title, description and image are required",
    )?;
    let image = required_field(payload.image, "Title, description and image are required")?;

    let service = Service::create(
        &state.db,
        title.trim(),
        &description,
        &image,
        payload.link.as_deref(),
    )
    .await?;

    info!(admin = %admin.id, id = %service.id, title = %service.title, "service created");
    Ok((StatusCode::CREATED, Json(service)))
}

#[instrument(skip(state, admin, payload))]
pub async fn update_service(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateServiceRequest>,
) -> Result<Json<Service>, ApiError> {
    let id = Uuid::parse_str(&id).map_err(|_| ApiError::validation("Invalid service id"))?;

    let service = Service::update(
        &state.db,
        id,
        payload.title.as_deref(),
        payload.description.as_deref(),
        payload.image.as_deref(),
        payload.link.as_deref(),
        payload.is_active,
    )
    .await?
    .ok_or(ApiError::NotFound("Service not found"))?;

    info!(admin = %admin.id, id = %service.id, "service updated");
    Ok(Json(service))
}

#[instrument(skip(state, admin))]
pub async fn delete_service(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = Uuid::parse_str(&id).map_err(|_| ApiError::validation("Invalid service id"))?;

    if !Service::delete_by_id(&state.db, id).await? {
        return Err(ApiError::NotFound("Service not found"));
    }

    info!(admin = %admin.id, id = %id, "service deleted");
    Ok(Json(serde_json::json!({ "message": "Service deleted" })))
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
    async fn create_rejects_missing_fields() {
        let state = AppState::fake();
        let payload = CreateServiceRequest {
            title: Some("Ravalement".into()),
            description: None,
            image: Some("/uploads/x.jpg".into()),
            link: None,
        };
        let err = create_service(State(state), admin(), Json(payload))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn update_rejects_malformed_id() {
        let state = AppState::fake();
        let payload = UpdateServiceRequest {
            title: Some("New title".into()),
            description: None,
            image: None,
            link: None,
            is_active: None,
        };
        let err = update_service(State(state), admin(), Path("nope".into()), Json(payload))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn delete_rejects_malformed_id() {
        let state = AppState::fake();
        let err = delete_service(State(state), admin(), Path("nope".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
