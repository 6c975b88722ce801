//! Catalog API - REST server for brand and product management

use axum_helpers::server::{close_postgres, create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Before anything fallible, so startup errors come out colored
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    // The database may still be coming up alongside us; retry before giving up
    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    database::postgres::run_migrations::<migration::Migrator>(&db, "catalog-api")
        .await
        .map_err(|e| eyre::eyre!("Migration failed: {}", e))?;

    let state = AppState { config, db };

    // Doc UIs, middleware and the /api prefix wrap our routes here
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api::routes(&state)).await?;

    // /health is static liveness; /ready actually queries the database
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()));

    let server_config = state.config.server.clone();
    info!("Starting catalog API on port {}", server_config.port);

    create_production_app(app, &server_config, SHUTDOWN_TIMEOUT, async move {
        info!("Shutting down: closing database connections");
        close_postgres(state.db, "main").await;
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Catalog API shutdown complete");
    Ok(())
}
