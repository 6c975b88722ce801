use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

/// Path extractor that insists the `{id}` segment is a UUID.
///
/// A malformed id short-circuits the handler with the standard
/// `INVALID_UUID` envelope instead of axum's plain-text path rejection.
///
/// ```ignore
/// use axum::{Router, routing::get};
/// use axum_helpers::extractors::UuidPath;
///
/// async fn get_brand(UuidPath(id): UuidPath) -> String {
///     format!("Brand ID: {}", id)
/// }
///
/// let app = Router::new().route("/brand/{id}", get(get_brand));
/// ```
pub struct UuidPath(pub Uuid);

impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        Uuid::parse_str(&raw)
            .map(UuidPath)
            .map_err(|e| AppError::UuidError(e).into_response())
    }
}
