//! Credential store
//!
//! The store is reached through two async ports, one per collection.
//! Lookups by id return `Ok(None)` for a missing record; callers decide how
//! to surface that.

use async_trait::async_trait;
use catalog_shared::{NewProduct, NewUser, Product, ProductChanges, StoreError, User};
use uuid::Uuid;

pub mod product;
pub mod user;

pub use product::{InMemoryProductRepository, PgProductRepository};
pub use user::{InMemoryUserRepository, PgUserRepository};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence port for user records
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: NewUser) -> StoreResult<User>;
    async fn find_all(&self) -> StoreResult<Vec<User>>;
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    /// Cheap reachability check for readiness probes
    async fn ping(&self) -> StoreResult<()>;
}

/// Persistence port for product records
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, product: NewProduct) -> StoreResult<Product>;
    async fn find_all(&self) -> StoreResult<Vec<Product>>;
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Product>>;
    /// Apply `changes`, returning the updated record or `None` if absent
    async fn update_by_id(&self, id: Uuid, changes: ProductChanges)
        -> StoreResult<Option<Product>>;
    /// Remove a record, returning it or `None` if absent
    async fn delete_by_id(&self, id: Uuid) -> StoreResult<Option<Product>>;
    async fn ping(&self) -> StoreResult<()>;
}

pub(crate) fn unavailable(err: sqlx::Error) -> StoreError {
    StoreError::Unavailable(err.to_string())
}
