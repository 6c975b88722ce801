//! HTTP plumbing shared by the workspace's axum services.
//!
//! - [`server`]: router bootstrap with OpenAPI doc UIs, health/readiness,
//!   coordinated graceful shutdown
//! - [`http`]: CORS and security-header middleware
//! - [`errors`]: the `AppError`/`ErrorCode` envelope every endpoint returns
//! - [`extractors`]: `UuidPath` and `ValidatedJson`
//! - [`audit`]: the audit trail for write operations
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::time::Duration;
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_routes = Router::new(); // Add your routes
//!     let router = create_router::<ApiDoc>(api_routes).await?;
//!
//!     let config = ServerConfig::default();
//!     create_production_app(router, &config, Duration::from_secs(30), async {}).await?;
//!     Ok(())
//! }
//! ```

pub mod audit;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks,
};

pub use http::{create_cors_layer, create_permissive_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{UuidPath, ValidatedJson};

pub use audit::{AuditEvent, AuditOutcome, extract_ip_from_headers, extract_user_agent};
