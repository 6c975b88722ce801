use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use core_config::AppInfo;
use futures::future::join_all;
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::future::Future;
use std::pin::Pin;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub name: &'static str,
    pub version: &'static str,
}

/// Boxed readiness probe; an `Err` carries the failure description.
pub type HealthCheckFuture<'a> = Pin<Box<dyn Future<Output = Result<(), String>> + Send + 'a>>;

/// Runs the named readiness probes concurrently and folds them into one
/// JSON verdict.
///
/// Each probe shows up in the body as `"<name>": "connected"` or
/// `"disconnected"`. `Ok` means every probe passed (200); `Err` means at
/// least one failed (503).
///
/// ```ignore
/// let checks = vec![
///     ("database", Box::pin(async {
///         check_database(db).await.map_err(|e| e.to_string())
///     }) as HealthCheckFuture),
/// ];
/// run_health_checks(checks).await
/// ```
pub async fn run_health_checks(
    checks: Vec<(&str, HealthCheckFuture<'_>)>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let (names, probes): (Vec<_>, Vec<_>) = checks.into_iter().unzip();
    let outcomes = join_all(probes).await;

    let mut ready = true;
    let mut body = Map::new();

    for (name, outcome) in names.into_iter().zip(outcomes) {
        let verdict = match outcome {
            Ok(()) => "connected",
            Err(e) => {
                tracing::error!("Readiness check failed: {} error: {:?}", name, e);
                ready = false;
                "disconnected"
            }
        };
        body.insert(name.to_string(), json!(verdict));
    }

    body.insert(
        "status".to_string(),
        json!(if ready { "ready" } else { "not ready" }),
    );

    if ready {
        Ok((StatusCode::OK, Json(Value::Object(body))))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(Value::Object(body))))
    }
}

/// Liveness handler: 200 with the app name and version whenever the
/// process is up. Dependency state belongs in the ready endpoint instead.
pub async fn health_handler(State(app): State<AppInfo>) -> Response {
    let body = HealthResponse {
        status: "healthy",
        name: app.name,
        version: app.version,
    };

    (StatusCode::OK, Json(body)).into_response()
}

/// Router exposing `/health`, meant to be merged into the app:
///
/// ```ignore
/// use axum_helpers::server::health_router;
/// use core_config::app_info;
///
/// let app = Router::new().merge(health_router(app_info!()));
/// ```
pub fn health_router(app_info: AppInfo) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(app_info)
}
