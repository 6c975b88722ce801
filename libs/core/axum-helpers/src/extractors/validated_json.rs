use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body extractor that runs the payload's `Validate` rules.
///
/// Deserialization failures come back as `JSON_EXTRACTION`, rule failures
/// as `VALIDATION_ERROR` with per-field details, so handlers only ever see
/// a well-formed, validated value.
///
/// ```ignore
/// use axum::{Router, routing::post};
/// use axum_helpers::extractors::ValidatedJson;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct CreateBrand {
///     #[validate(length(min = 1, max = 255))]
///     name: String,
/// }
///
/// async fn create_brand(ValidatedJson(payload): ValidatedJson<CreateBrand>) -> String {
///     format!("Creating brand: {}", payload.name)
/// }
///
/// let app = Router::new().route("/brand", post(create_brand));
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        payload
            .validate()
            .map_err(|e| AppError::from(e).into_response())?;

        Ok(ValidatedJson(payload))
    }
}
