//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction. The token
//! service is built once from the configured secret and never changes
//! afterwards.

use crate::auth::TokenService;
use crate::config::AppConfig;
use crate::repositories::{
    InMemoryProductRepository, InMemoryUserRepository, PgProductRepository, PgUserRepository,
    ProductRepository, UserRepository,
};
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state
///
/// All fields are Arc'd, so cloning per request is O(1).
#[derive(Clone)]
pub struct AppState {
    /// User collection
    pub users: Arc<dyn UserRepository>,
    /// Product collection
    pub products: Arc<dyn ProductRepository>,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Token service holding the shared secret's keys
    pub tokens: TokenService,
}

impl AppState {
    /// Create a new application state over the given repositories
    pub fn new(
        users: Arc<dyn UserRepository>,
        products: Arc<dyn ProductRepository>,
        config: AppConfig,
    ) -> Self {
        let tokens = TokenService::new(&config.jwt.secret, config.jwt.expiry_secs);

        Self {
            users,
            products,
            config: Arc::new(config),
            tokens,
        }
    }

    /// State backed by PostgreSQL
    pub fn postgres(pool: PgPool, config: AppConfig) -> Self {
        Self::new(
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgProductRepository::new(pool)),
            config,
        )
    }

    /// State backed by process-local maps
    pub fn in_memory(config: AppConfig) -> Self {
        Self::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryProductRepository::new()),
            config,
        )
    }

    #[inline]
    pub fn users(&self) -> &dyn UserRepository {
        self.users.as_ref()
    }

    #[inline]
    pub fn products(&self) -> &dyn ProductRepository {
        self.products.as_ref()
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_clone_is_cheap() {
        let state = AppState::in_memory(AppConfig::default());
        let cloned = state.clone();
        assert!(Arc::ptr_eq(&state.config, &cloned.config));
        assert!(Arc::ptr_eq(&state.products, &cloned.products));
    }

    #[test]
    fn test_token_service_uses_configured_secret() {
        let state = AppState::in_memory(AppConfig::default());
        let token = state.tokens().issue("ada@example.com").unwrap();

        let same_secret = TokenService::new(&state.config().jwt.secret, None);
        assert_eq!(same_secret.verify(&token).unwrap().email, "ada@example.com");
    }
}
