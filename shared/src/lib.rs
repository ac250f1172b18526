//! Product Catalog Shared Library
//!
//! Shared models, request/response types, validation schemas and error
//! types used by the backend and its tests.

pub mod errors;
pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use models::{NewProduct, NewUser, Product, ProductChanges, User};
pub use types::*;
pub use validation::{Schema, Validate, ValidationError};
