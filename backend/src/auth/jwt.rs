//! JWT token issuance and verification
//!
//! Tokens carry the user's email and are signed with HS256 using the
//! process-wide secret. Keys are derived once at startup.

use anyhow::Result;
use catalog_shared::AuthError;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// JWT claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Email of the authenticated user
    pub email: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp), absent when tokens do not expire
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

/// Pre-computed JWT keys for efficient token operations
#[derive(Clone)]
struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    /// Create new JWT keys from secret
    fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }

    fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}

/// Token service holding the shared secret's keys
///
/// Cloning is cheap; every request handler shares the same keys.
#[derive(Clone)]
pub struct TokenService {
    keys: JwtKeys,
    expiry_secs: Option<i64>,
    validation: Arc<Validation>,
}

impl TokenService {
    /// Create a token service; call once at startup.
    pub fn new(secret: &str, expiry_secs: Option<i64>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // `exp` is only enforced when the issuer set one
        validation.required_spec_claims.clear();
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            keys: JwtKeys::new(secret),
            expiry_secs,
            validation: Arc::new(validation),
        }
    }

    /// Issue a signed token for `email`
    pub fn issue(&self, email: &str) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            email: email.to_string(),
            iat: now.timestamp(),
            exp: self
                .expiry_secs
                .map(|secs| (now + Duration::seconds(secs)).timestamp()),
        };

        encode(&Header::new(Algorithm::HS256), &claims, self.keys.encoding())
            .map_err(|e| anyhow::anyhow!("Failed to sign token: {}", e))
    }

    /// Verify a token's signature and expiry, returning its claims
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, self.keys.decoding(), &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => AuthError::BadSignature,
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::MalformedToken,
            })
    }
}
