use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use super::ApiError;

/// Name rule shared by the single-item create and update endpoints.
pub fn validate_anime_name(name: Option<String>) -> Result<String, ApiError> {
    match name {
        None => Err(ApiError::validation("Anime name must not be null")),
        Some(name) if name.is_empty() => Err(ApiError::validation("Anime name must not be empty")),
        Some(name) => Ok(name),
    }
}

/// `Json` extractor whose rejections (malformed JSON, wrong content type,
/// type mismatches) surface as a 400 [`ApiError::ValidationError`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::validation(rejection.body_text()))?;
        Ok(Self(value))
    }
}
