//! Connection teardown helpers for graceful shutdown.

use tracing::{error, info};

/// Closes a SeaORM Postgres pool and logs the outcome.
///
/// Dropping the connection would close it too; the explicit call exists so
/// shutdown leaves a log trail. `name` distinguishes pools when an app
/// holds several.
pub async fn close_postgres(db: sea_orm::DatabaseConnection, name: &str) {
    match db.close().await {
        Ok(()) => info!("PostgreSQL connection '{}' closed successfully", name),
        Err(e) => error!("Error closing PostgreSQL connection '{}': {}", name, e),
    }
}
