pub mod auth;
pub mod comments;
pub mod export;
pub mod health;
pub mod leads;
pub mod notifications;
pub mod reports;
pub mod tasks;
pub mod users;

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::middleware::{auth::require_session, cors::client_cors};
use crate::AppState;

const JSON_BODY_LIMIT: usize = 1024 * 1024;
// Multipart framing on top of the file itself.
const UPLOAD_OVERHEAD: usize = 64 * 1024;

/// Assembles the full HTTP surface: public health/auth routes plus the
/// session-protected `/api` tree.
pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health::health))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login));

    let upload_limit = state.config.import_max_bytes + UPLOAD_OVERHEAD;
    let import_route = Router::new()
        .route("/api/leads/import", post(export::import_leads))
        .layer(DefaultBodyLimit::max(upload_limit));

    let protected_routes = Router::new()
        .route("/api/leads", get(leads::list_leads).post(leads::create_lead))
        .route("/api/leads/export", get(export::export_leads))
        .route(
            "/api/leads/:id",
            get(leads::get_lead).delete(leads::delete_lead),
        )
        .route("/api/leads/:id/details", patch(leads::update_lead_details))
        .route("/api/leads/:id/status", patch(leads::update_lead_status))
        .route("/api/leads/:id/assign", patch(leads::assign_lead))
        .route("/api/leads/:id/logs", get(leads::list_lead_logs))
        .route(
            "/api/leads/:id/tasks",
            get(tasks::list_tasks).post(tasks::create_task),
        )
        .route("/api/tasks/:id/toggle", patch(tasks::toggle_task))
        .route("/api/tasks/:id", delete(tasks::delete_task))
        .route(
            "/api/leads/:id/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route("/api/reports/quick-stats", get(reports::quick_stats))
        .route("/api/users", get(users::list_users).post(users::create_user))
        .route("/api/users/sales", get(users::list_sales_users))
        .route(
            "/api/users/:id",
            get(users::get_user).delete(users::delete_user),
        )
        .route("/api/notifications", get(notifications::list_notifications))
        .route(
            "/api/notifications/mark-read",
            patch(notifications::mark_notifications_read),
        )
        .layer(DefaultBodyLimit::max(JSON_BODY_LIMIT))
        .merge(import_route)
        .layer(from_fn_with_state(state.clone(), require_session));

    let cors = client_cors(&state.config.cors_origin);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}
