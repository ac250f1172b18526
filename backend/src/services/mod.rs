//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories, password hashing and token issuance.

pub mod product;
pub mod user;

pub use product::ProductService;
pub use user::UserService;
