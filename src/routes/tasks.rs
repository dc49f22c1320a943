use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    dto::task_dto::CreateTaskPayload,
    error::Result,
    middleware::auth::CurrentUser,
    utils::validation::{ValidJson, ValidPath},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/leads/{id}/tasks",
    params(
        ("id" = Uuid, Path, description = "Lead ID")
    ),
    responses(
        (status = 200, description = "Tasks for the lead, open ones first"),
        (status = 404, description = "Lead not found")
    )
)]
#[axum::debug_handler]
pub async fn list_tasks(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidPath(lead_id): ValidPath<Uuid>,
) -> Result<impl IntoResponse> {
    state.lead_service.ensure_access(lead_id, &user).await?;
    let tasks = state.task_service.list_for_lead(lead_id).await?;
    Ok(Json(tasks))
}

#[utoipa::path(
    post,
    path = "/api/leads/{id}/tasks",
    params(
        ("id" = Uuid, Path, description = "Lead ID")
    ),
    responses(
        (status = 201, description = "Task added"),
        (status = 400, description = "Description required"),
        (status = 404, description = "Lead not found")
    )
)]
#[axum::debug_handler]
pub async fn create_task(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidPath(lead_id): ValidPath<Uuid>,
    ValidJson(payload): ValidJson<CreateTaskPayload>,
) -> Result<impl IntoResponse> {
    state.lead_service.ensure_access(lead_id, &user).await?;
    let task = state
        .task_service
        .create(lead_id, user.user_id, payload)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Task added.", "task": task })),
    ))
}

#[utoipa::path(
    patch,
    path = "/api/tasks/{id}/toggle",
    params(
        ("id" = Uuid, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Completion flag flipped"),
        (status = 404, description = "Task not found")
    )
)]
#[axum::debug_handler]
pub async fn toggle_task(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidPath(task_id): ValidPath<Uuid>,
) -> Result<impl IntoResponse> {
    let lead_id = state.task_service.lead_of(task_id).await?;
    state.lead_service.ensure_access(lead_id, &user).await?;
    let task = state.task_service.toggle(task_id).await?;
    Ok(Json(json!({ "message": "Task updated.", "task": task })))
}

#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    params(
        ("id" = Uuid, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task deleted"),
        (status = 404, description = "Task not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_task(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidPath(task_id): ValidPath<Uuid>,
) -> Result<impl IntoResponse> {
    let lead_id = state.task_service.lead_of(task_id).await?;
    state.lead_service.ensure_access(lead_id, &user).await?;
    state.task_service.delete(task_id).await?;
    Ok(Json(json!({ "message": "Task deleted." })))
}
