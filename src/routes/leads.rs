use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    dto::lead_dto::{
        normalize_notes, AssignLeadPayload, CreateLeadPayload, CreateLeadResponse,
        UpdateLeadDetailsPayload, UpdateLeadStatusPayload,
    },
    error::Result,
    middleware::auth::{AdminUser, CurrentUser},
    utils::validation::{ValidJson, ValidPath},
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/leads",
    responses(
        (status = 201, description = "Lead created"),
        (status = 400, description = "Name or ContactInfo missing"),
        (status = 403, description = "Only admins may set an assignee"),
        (status = 404, description = "Assignee not found")
    )
)]
#[axum::debug_handler]
pub async fn create_lead(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidJson(payload): ValidJson<CreateLeadPayload>,
) -> Result<impl IntoResponse> {
    let lead = payload.into_new_lead()?;
    let lead_id = state.lead_service.create(lead, &user).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateLeadResponse {
            message: "Lead created!".to_string(),
            lead_id,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/leads",
    responses(
        (status = 200, description = "Leads visible to the caller, newest first")
    )
)]
#[axum::debug_handler]
pub async fn list_leads(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<impl IntoResponse> {
    let leads = state.lead_service.list(&user).await?;
    Ok(Json(leads))
}

#[utoipa::path(
    get,
    path = "/api/leads/{id}",
    params(
        ("id" = Uuid, Path, description = "Lead ID")
    ),
    responses(
        (status = 200, description = "Lead found"),
        (status = 403, description = "Lead belongs to someone else"),
        (status = 404, description = "Lead not found")
    )
)]
#[axum::debug_handler]
pub async fn get_lead(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<impl IntoResponse> {
    let lead = state.lead_service.get_for(id, &user).await?;
    Ok(Json(lead))
}

#[utoipa::path(
    patch,
    path = "/api/leads/{id}/details",
    params(
        ("id" = Uuid, Path, description = "Lead ID")
    ),
    responses(
        (status = 200, description = "Lead details updated"),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Lead not found")
    )
)]
#[axum::debug_handler]
pub async fn update_lead_details(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidPath(id): ValidPath<Uuid>,
    ValidJson(payload): ValidJson<UpdateLeadDetailsPayload>,
) -> Result<impl IntoResponse> {
    let notes = normalize_notes(payload.notes);
    state
        .lead_service
        .update_details(
            id,
            payload.name.trim(),
            payload.contact_info.trim(),
            notes.as_deref(),
            &user,
        )
        .await?;
    Ok(Json(json!({ "message": "Updated." })))
}

#[utoipa::path(
    patch,
    path = "/api/leads/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Lead ID")
    ),
    responses(
        (status = 200, description = "Status updated"),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "Lead not found")
    )
)]
#[axum::debug_handler]
pub async fn update_lead_status(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidPath(id): ValidPath<Uuid>,
    ValidJson(payload): ValidJson<UpdateLeadStatusPayload>,
) -> Result<impl IntoResponse> {
    state
        .lead_service
        .update_status(id, payload.status, &user)
        .await?;
    Ok(Json(json!({ "message": "Status updated." })))
}

#[utoipa::path(
    patch,
    path = "/api/leads/{id}/assign",
    params(
        ("id" = Uuid, Path, description = "Lead ID")
    ),
    responses(
        (status = 200, description = "Assignee set or cleared"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Lead or user not found")
    )
)]
#[axum::debug_handler]
pub async fn assign_lead(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ValidPath(id): ValidPath<Uuid>,
    ValidJson(payload): ValidJson<AssignLeadPayload>,
) -> Result<impl IntoResponse> {
    let assignee = payload.assignee()?;
    state.lead_service.assign(id, assignee, &admin).await?;
    Ok(Json(json!({ "message": "Assigned." })))
}

#[utoipa::path(
    delete,
    path = "/api/leads/{id}",
    params(
        ("id" = Uuid, Path, description = "Lead ID")
    ),
    responses(
        (status = 200, description = "Lead and its tasks, comments and logs deleted"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Lead not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_lead(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<impl IntoResponse> {
    state.lead_service.delete(id).await?;
    Ok(Json(json!({ "message": "Deleted" })))
}

#[utoipa::path(
    get,
    path = "/api/leads/{id}/logs",
    params(
        ("id" = Uuid, Path, description = "Lead ID")
    ),
    responses(
        (status = 200, description = "Activity log, newest first"),
        (status = 404, description = "Lead not found")
    )
)]
#[axum::debug_handler]
pub async fn list_lead_logs(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<impl IntoResponse> {
    state.lead_service.ensure_access(id, &user).await?;
    let logs = state.lead_log_service.list_for_lead(id).await?;
    Ok(Json(logs))
}
