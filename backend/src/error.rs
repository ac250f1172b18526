//! Application error handling
//!
//! This module provides unified error handling for the API,
//! converting internal errors to appropriate HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use catalog_shared::{
    AuthError, ErrorDetail, ErrorResponse, StoreError, ValidationError,
};
use thiserror::Error;
use tracing::error;

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn product_not_found() -> Self {
        ApiError::NotFound("Product Not Found".to_string())
    }

    /// Status and machine-readable code for this error
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Auth(AuthError::MissingToken) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ApiError::Auth(AuthError::InvalidCredentials) => {
                (StatusCode::BAD_REQUEST, "INVALID_CREDENTIALS")
            }
            ApiError::Auth(_) => (StatusCode::BAD_REQUEST, "INVALID_TOKEN"),
            ApiError::Conflict(_) => (StatusCode::BAD_REQUEST, "CONFLICT"),
            ApiError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let mut field = None;
        let mut details = None;

        let message = match &self {
            ApiError::Validation(err) => {
                field = Some(err.field.clone());
                err.to_string()
            }
            ApiError::NotFound(msg) | ApiError::Conflict(msg) | ApiError::BadRequest(msg) => {
                msg.clone()
            }
            ApiError::Auth(err) if err.is_token_rejection() => "Invalid token.".to_string(),
            ApiError::Auth(err) => err.to_string(),
            ApiError::Store(StoreError::Unavailable(msg)) => {
                error!("Store error: {}", msg);
                details = Some(serde_json::Value::String(msg.clone()));
                "A store error occurred".to_string()
            }
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                details = Some(serde_json::Value::String(err.to_string()));
                "Internal Server Error".to_string()
            }
        };

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                field,
                details,
            },
        });

        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ApiError::Validation(ValidationError::new("email", "is required")), StatusCode::BAD_REQUEST)]
    #[case(ApiError::product_not_found(), StatusCode::NOT_FOUND)]
    #[case(ApiError::Auth(AuthError::MissingToken), StatusCode::UNAUTHORIZED)]
    #[case(ApiError::Auth(AuthError::BadSignature), StatusCode::BAD_REQUEST)]
    #[case(ApiError::Auth(AuthError::TokenExpired), StatusCode::BAD_REQUEST)]
    #[case(ApiError::Auth(AuthError::InvalidCredentials), StatusCode::BAD_REQUEST)]
    #[case(ApiError::Conflict("User already registered.".to_string()), StatusCode::BAD_REQUEST)]
    #[case(ApiError::Store(StoreError::Unavailable("down".to_string())), StatusCode::INTERNAL_SERVER_ERROR)]
    #[case(ApiError::Internal(anyhow::anyhow!("boom")), StatusCode::INTERNAL_SERVER_ERROR)]
    fn test_error_status(#[case] error: ApiError, #[case] expected: StatusCode) {
        let response = error.into_response();
        assert_eq!(response.status(), expected);
    }

    #[tokio::test]
    async fn test_token_failures_share_one_message() {
        for err in [
            AuthError::MalformedToken,
            AuthError::BadSignature,
            AuthError::TokenExpired,
        ] {
            let response = ApiError::Auth(err).into_response();
            let body = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(body["error"]["message"], "Invalid token.");
            assert_eq!(body["error"]["code"], "INVALID_TOKEN");
        }
    }

    #[tokio::test]
    async fn test_store_failure_carries_details() {
        let response =
            ApiError::Store(StoreError::Unavailable("connection refused".to_string()))
                .into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"]["details"], "connection refused");
    }
}
