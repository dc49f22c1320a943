use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    error::{Error, Result},
    middleware::auth::AdminUser,
    services::import_export_service::parse_import,
    AppState,
};

const UPLOAD_FIELD: &str = "file";

/// Export every lead as CSV
#[utoipa::path(
    get,
    path = "/api/leads/export",
    responses(
        (status = 200, description = "CSV attachment with all leads"),
        (status = 403, description = "Admin role required")
    )
)]
#[axum::debug_handler]
pub async fn export_leads(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
) -> Result<impl IntoResponse> {
    let buffer = state.import_export_service.export_csv().await?;
    tracing::debug!(by = %admin.user_id, bytes = buffer.len(), "csv export served");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"leads.csv\""),
        ],
        buffer,
    ))
}

/// Import leads from an uploaded CSV (multipart field `file`)
#[utoipa::path(
    post,
    path = "/api/leads/import",
    responses(
        (status = 200, description = "Import finished with imported/skipped counts"),
        (status = 400, description = "Missing, oversized or unreadable file"),
        (status = 403, description = "Admin role required")
    )
)]
#[axum::debug_handler]
pub async fn import_leads(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse> {
    let mut multipart = multipart.map_err(|rejection| Error::BadRequest(rejection.body_text()))?;
    let max_bytes = state.config.import_max_bytes;
    let mut upload: Option<Vec<u8>> = None;

    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let mut data = Vec::new();
        while let Some(chunk) = field.chunk().await? {
            if data.len() + chunk.len() > max_bytes {
                return Err(Error::BadRequest(format!(
                    "File too large. Limit is {} bytes.",
                    max_bytes
                )));
            }
            data.extend_from_slice(&chunk);
        }
        upload = Some(data);
        break;
    }

    let Some(data) = upload else {
        return Err(Error::BadRequest("No file.".to_string()));
    };

    let parsed = parse_import(&data, state.config.import_max_rows)?;
    let summary = state.import_export_service.import(parsed, &admin).await?;
    Ok(Json(summary))
}
