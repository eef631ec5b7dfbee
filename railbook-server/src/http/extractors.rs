//! Custom Axum extractors

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use crate::models::{RecordId, ValidationError};
use super::error::ApiError;

/// Extract and validate a record id from the path.
///
/// Rejects with a JSON 400 instead of axum's plain-text rejection.
pub struct ValidId(pub RecordId);

impl<S> FromRequestParts<S> for ValidId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::Empty { field: "id" }))?;

        Ok(Self(RecordId::parse(&id)?))
    }
}
