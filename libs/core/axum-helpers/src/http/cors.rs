use axum::http::{HeaderValue, Method, header};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(3600);

/// CORS layer restricted to the given origins.
///
/// Allows the REST verbs this service exposes plus OPTIONS, the
/// Content-Type and Accept headers, and caches preflight results for an
/// hour.
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(PREFLIGHT_MAX_AGE)
}

/// Any-origin CORS layer for local development.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}
