use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::{error::Result, middleware::auth::CurrentUser, AppState};

#[utoipa::path(
    get,
    path = "/api/notifications",
    responses(
        (status = 200, description = "The caller's 10 newest notifications")
    )
)]
#[axum::debug_handler]
pub async fn list_notifications(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<impl IntoResponse> {
    let notifications = state.notification_service.list_recent(user.user_id).await?;
    Ok(Json(notifications))
}

#[utoipa::path(
    patch,
    path = "/api/notifications/mark-read",
    responses(
        (status = 200, description = "All of the caller's notifications marked read")
    )
)]
#[axum::debug_handler]
pub async fn mark_notifications_read(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<impl IntoResponse> {
    let updated = state.notification_service.mark_all_read(user.user_id).await?;
    tracing::debug!(user_id = %user.user_id, updated, "notifications marked read");
    Ok(Json(json!({ "message": "Marked read." })))
}
