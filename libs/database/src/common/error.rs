/// Failures surfaced by the connector layer.
///
/// SeaORM's `DbErr` stays internal; callers see which phase went wrong
/// (connecting, probing, migrating) with the underlying cause flattened
/// into the message.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    #[error("Migration error: {0}")]
    MigrationError(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
