use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    dto::auth_dto::RegisterPayload,
    error::Result,
    middleware::auth::AdminUser,
    utils::validation::{ValidJson, ValidPath},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All accounts, newest first"),
        (status = 403, description = "Admin role required")
    )
)]
#[axum::debug_handler]
pub async fn list_users(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> Result<impl IntoResponse> {
    let users = state.user_service.list().await?;
    Ok(Json(users))
}

#[utoipa::path(
    get,
    path = "/api/users/sales",
    responses(
        (status = 200, description = "Sales users for the assignment picker"),
        (status = 403, description = "Admin role required")
    )
)]
#[axum::debug_handler]
pub async fn list_sales_users(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> Result<impl IntoResponse> {
    let users = state.user_service.list_sales().await?;
    Ok(Json(users))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
pub async fn get_user(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<impl IntoResponse> {
    let user = state.user_service.get(id).await?;
    Ok(Json(user))
}

#[utoipa::path(
    post,
    path = "/api/users",
    responses(
        (status = 201, description = "User created"),
        (status = 400, description = "Missing or invalid fields"),
        (status = 403, description = "Admin role required"),
        (status = 409, description = "User already exists")
    )
)]
#[axum::debug_handler]
pub async fn create_user(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ValidJson(payload): ValidJson<RegisterPayload>,
) -> Result<impl IntoResponse> {
    let user_id = state.user_service.create(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User created.", "userId": user_id })),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted, their leads unassigned"),
        (status = 400, description = "Cannot delete yourself"),
        (status = 404, description = "User not found"),
        (status = 409, description = "User still created leads")
    )
)]
#[axum::debug_handler]
pub async fn delete_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<impl IntoResponse> {
    state.user_service.delete(id, &admin).await?;
    Ok(Json(json!({ "message": "Deleted" })))
}
