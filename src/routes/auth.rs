use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::{
    dto::auth_dto::{LoginPayload, LoginResponse, RegisterPayload, SessionUser},
    error::Result,
    utils::validation::ValidJson,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/auth/register",
    responses(
        (status = 201, description = "User registered"),
        (status = 400, description = "Missing or invalid fields"),
        (status = 403, description = "An Admin already exists"),
        (status = 409, description = "User already exists")
    )
)]
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<RegisterPayload>,
) -> Result<impl IntoResponse> {
    state.user_service.register(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered successfully!" })),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    responses(
        (status = 200, description = "Session token issued"),
        (status = 401, description = "Invalid credentials")
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<LoginPayload>,
) -> Result<impl IntoResponse> {
    let user = state
        .user_service
        .authenticate(&payload.email, &payload.password)
        .await?;
    let token = state.sessions.issue(user.id, &user.username, user.role)?;
    tracing::info!(user_id = %user.id, "user logged in");

    Ok(Json(LoginResponse {
        message: "Login successful!".to_string(),
        token,
        user: SessionUser::from(user),
    }))
}
