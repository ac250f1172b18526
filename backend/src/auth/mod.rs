//! Authentication module
//!
//! Provides JWT-based authentication with bcrypt password hashing.

mod jwt;
mod middleware;
mod password;

pub use jwt::{Claims, TokenService};
pub use middleware::{require_token, AuthUser, TokenGate, X_AUTH_TOKEN};
pub use password::{PasswordService, HASH_COST};
