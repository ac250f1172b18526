//! Request extractors

use crate::error::ApiError;
use axum::{
    extract::{FromRequest, Request},
    Json,
};
use catalog_shared::Validate;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// JSON body checked against the payload's schema before deserialization
///
/// Rejects with a 400 before the handler runs, so no store call happens on
/// an invalid payload.
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        T::schema().validate(&payload)?;

        let value = serde_json::from_value(payload)
            .map_err(|e| ApiError::BadRequest(format!("Invalid payload: {}", e)))?;

        Ok(Self(value))
    }
}
