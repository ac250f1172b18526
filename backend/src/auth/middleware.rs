//! Authentication middleware
//!
//! A [`TokenGate`] reads a raw token from one named request header and
//! verifies it with the shared [`TokenService`]. Product writes and the user
//! protected route are separate surfaces, so each gets its own gate.

use super::jwt::{Claims, TokenService};
use crate::error::ApiError;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, HeaderName},
    middleware::Next,
    response::Response,
};
use catalog_shared::AuthError;
use tracing::{debug, warn};

/// Header carrying the token on the user routes
pub const X_AUTH_TOKEN: HeaderName = HeaderName::from_static("x-auth-token");

/// Identity attached to the request once its token verified
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub email: String,
    pub claims: Claims,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(ApiError::Auth(AuthError::MissingToken))
    }
}

/// Token check bound to a single header name
#[derive(Clone)]
pub struct TokenGate {
    header: HeaderName,
    tokens: TokenService,
}

impl TokenGate {
    pub fn new(header: HeaderName, tokens: TokenService) -> Self {
        Self { header, tokens }
    }

    /// Gate reading the `Authorization` header (raw token, no scheme)
    pub fn authorization(tokens: TokenService) -> Self {
        Self::new(AUTHORIZATION, tokens)
    }

    /// Gate reading the `x-auth-token` header
    pub fn x_auth_token(tokens: TokenService) -> Self {
        Self::new(X_AUTH_TOKEN, tokens)
    }

    pub fn header(&self) -> &HeaderName {
        &self.header
    }

    /// Extract and verify the token from `headers`
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<AuthUser, AuthError> {
        let value = match headers.get(&self.header) {
            Some(value) if !value.is_empty() => value,
            _ => return Err(AuthError::MissingToken),
        };

        let token = value.to_str().map_err(|_| AuthError::MalformedToken)?.trim();
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }

        let claims = self.tokens.verify(token)?;
        Ok(AuthUser {
            email: claims.email.clone(),
            claims,
        })
    }
}

/// Middleware rejecting requests without a valid token
///
/// Apply with `axum::middleware::from_fn_with_state(gate, require_token)`.
pub async fn require_token(
    State(gate): State<TokenGate>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = gate.authenticate(request.headers()).map_err(|e| {
        warn!(header = %gate.header, path = %request.uri().path(), "Rejected request: {}", e);
        e
    })?;

    debug!(email = %user.email, "Token accepted");
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn gate() -> TokenGate {
        TokenGate::x_auth_token(TokenService::new("test-secret", None))
    }

    #[test]
    fn test_missing_header() {
        let headers = HeaderMap::new();
        assert_eq!(
            gate().authenticate(&headers).unwrap_err(),
            AuthError::MissingToken
        );
    }

    #[test]
    fn test_empty_header_counts_as_missing() {
        let mut headers = HeaderMap::new();
        headers.insert(X_AUTH_TOKEN, HeaderValue::from_static(""));
        assert_eq!(
            gate().authenticate(&headers).unwrap_err(),
            AuthError::MissingToken
        );
    }

    #[test]
    fn test_valid_token_yields_identity() {
        let gate = gate();
        let token = gate.tokens.issue("ada@example.com").unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(X_AUTH_TOKEN, HeaderValue::from_str(&token).unwrap());

        let user = gate.authenticate(&headers).unwrap();
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.claims.email, "ada@example.com");
    }

    #[test]
    fn test_gate_only_reads_its_own_header() {
        let gate = gate();
        let token = gate.tokens.issue("ada@example.com").unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&token).unwrap());

        assert_eq!(
            gate.authenticate(&headers).unwrap_err(),
            AuthError::MissingToken
        );
    }

    #[test]
    fn test_bearer_prefix_is_not_stripped() {
        let tokens = TokenService::new("test-secret", None);
        let gate = TokenGate::authorization(tokens.clone());
        let token = tokens.issue("ada@example.com").unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );

        assert!(gate.authenticate(&headers).unwrap_err().is_token_rejection());
    }

    #[test]
    fn test_header_names() {
        let tokens = TokenService::new("test-secret", None);
        assert_eq!(TokenGate::authorization(tokens.clone()).header(), &AUTHORIZATION);
        assert_eq!(TokenGate::x_auth_token(tokens).header().as_str(), "x-auth-token");
    }
}
