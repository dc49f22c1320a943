use axum::{extract::State, response::IntoResponse, Json};

use crate::{error::Result, middleware::auth::AdminUser, AppState};

#[utoipa::path(
    get,
    path = "/api/reports/quick-stats",
    responses(
        (status = 200, description = "Status counts, per-user performance, summary and 7-day trend"),
        (status = 403, description = "Admin role required")
    )
)]
#[axum::debug_handler]
pub async fn quick_stats(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> Result<impl IntoResponse> {
    let stats = state.report_service.quick_stats().await?;
    Ok(Json(stats))
}
