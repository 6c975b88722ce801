use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Brand not found: {0}")]
    BrandNotFound(Uuid),

    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    #[error("The brand '{0}' does not exist")]
    UnknownBrand(String),

    #[error("Invalid id")]
    InvalidId,

    #[error("The id in the path does not match the id in the body")]
    IdMismatch,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Convert CatalogError to AppError for standardized error responses
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::BrandNotFound(id) => {
                AppError::NotFound(format!("Brand {} not found", id))
            }
            CatalogError::ProductNotFound(id) => {
                AppError::NotFound(format!("Product {} not found", id))
            }
            CatalogError::UnknownBrand(name) => {
                AppError::NotFound(format!("The brand '{}' does not exist", name))
            }
            CatalogError::InvalidId => AppError::BadRequest("Invalid id".to_string()),
            CatalogError::IdMismatch => AppError::BadRequest(
                "The id in the path does not match the id in the body".to_string(),
            ),
            CatalogError::Validation(msg) => AppError::BadRequest(msg),
            CatalogError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        // Convert to AppError for standardized error response format
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
