//! Signup and login
//!
//! Password hashing and verification run on the blocking thread pool.

use crate::auth::{PasswordService, TokenService};
use crate::error::ApiError;
use crate::repositories::UserRepository;
use catalog_shared::{AuthError, LoginRequest, NewUser, SignupRequest, User};
use tracing::{info, warn};

/// User service for registration and credential checks
pub struct UserService;

impl UserService {
    /// Register a new user
    ///
    /// Fails with a conflict when the email is already taken. The check and
    /// the insert are not atomic; a concurrent signup for the same email can
    /// still slip through.
    pub async fn signup(users: &dyn UserRepository, req: SignupRequest) -> Result<User, ApiError> {
        if users.find_by_email(&req.email).await?.is_some() {
            warn!(email = %req.email, "Signup rejected: email already registered");
            return Err(ApiError::Conflict("User already registered.".to_string()));
        }

        let password_hash = PasswordService::hash_async(req.password)
            .await
            .map_err(ApiError::Internal)?;

        let user = users
            .create(NewUser {
                name: req.name,
                email: req.email,
                password_hash,
                tel: None,
                profile_pic: None,
            })
            .await?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Check credentials and issue a token over the user's email
    ///
    /// Unknown email and wrong password produce the same error.
    pub async fn login(
        users: &dyn UserRepository,
        tokens: &TokenService,
        req: LoginRequest,
    ) -> Result<String, ApiError> {
        let user = users
            .find_by_email(&req.email)
            .await?
            .ok_or(ApiError::Auth(AuthError::InvalidCredentials))?;

        let valid = PasswordService::verify_async(req.password, user.password_hash)
            .await
            .map_err(ApiError::Internal)?;

        if !valid {
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = tokens.issue(&user.email).map_err(ApiError::Internal)?;
        info!(user_id = %user.id, "User logged in");
        Ok(token)
    }
}
