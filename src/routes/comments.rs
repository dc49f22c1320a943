use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    dto::comment_dto::CreateCommentPayload,
    error::Result,
    middleware::auth::CurrentUser,
    utils::validation::{ValidJson, ValidPath},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/leads/{id}/comments",
    params(
        ("id" = Uuid, Path, description = "Lead ID")
    ),
    responses(
        (status = 200, description = "Comments, newest first"),
        (status = 404, description = "Lead not found")
    )
)]
#[axum::debug_handler]
pub async fn list_comments(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidPath(lead_id): ValidPath<Uuid>,
) -> Result<impl IntoResponse> {
    state.lead_service.ensure_access(lead_id, &user).await?;
    let comments = state.comment_service.list_for_lead(lead_id).await?;
    Ok(Json(comments))
}

#[utoipa::path(
    post,
    path = "/api/leads/{id}/comments",
    params(
        ("id" = Uuid, Path, description = "Lead ID")
    ),
    responses(
        (status = 201, description = "Comment added"),
        (status = 400, description = "Comment text required"),
        (status = 404, description = "Lead not found")
    )
)]
#[axum::debug_handler]
pub async fn create_comment(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidPath(lead_id): ValidPath<Uuid>,
    ValidJson(payload): ValidJson<CreateCommentPayload>,
) -> Result<impl IntoResponse> {
    state.lead_service.ensure_access(lead_id, &user).await?;
    let comment = state
        .comment_service
        .create(lead_id, user.user_id, &payload.comment_text)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Added", "comment": comment })),
    ))
}
