use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

pub fn permissive_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(Any)
}

/// CORS for the single-page client. Falls back to permissive when the
/// configured origin is `*` or not a valid header value.
pub fn client_cors(origin: &str) -> CorsLayer {
    if origin == "*" {
        return permissive_cors();
    }
    let Ok(origin) = HeaderValue::from_str(origin) else {
        tracing::warn!(origin, "invalid CORS_ORIGIN, allowing any origin");
        return permissive_cors();
    };
    CorsLayer::new()
        .allow_origin(AllowOrigin::exact(origin))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::PUT,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
