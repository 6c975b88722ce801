use sea_orm::DatabaseConnection;

/// State threaded through the routers: the loaded config plus the shared
/// connection pool. Cloning is cheap, the pool is reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub db: DatabaseConnection,
}
