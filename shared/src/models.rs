//! Data models for the product catalog

use crate::validation::{Schema, Validate, NEW_PRODUCT_SCHEMA, PRODUCT_CHANGES_SCHEMA};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registered user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub tel: Option<i64>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub profile_pic: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User fields supplied at creation; the store assigns id and timestamps
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub tel: Option<i64>,
    pub profile_pic: Option<String>,
}

impl NewUser {
    pub fn into_user(self, id: Uuid, now: DateTime<Utc>) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            tel: self.tel,
            password_hash: self.password_hash,
            profile_pic: self.profile_pic,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Apply a partial update in place and bump `updated_at`
    pub fn apply(&mut self, changes: ProductChanges, now: DateTime<Utc>) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(quantity) = changes.quantity {
            self.quantity = quantity;
        }
        if let Some(image) = changes.image {
            self.image = Some(image);
        }
        self.updated_at = now;
    }
}

/// Allow-listed product fields accepted on creation
///
/// Deserializing into this type is the projection: any key not named here
/// is dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub image: Option<String>,
}

impl NewProduct {
    pub fn into_product(self, id: Uuid, now: DateTime<Utc>) -> Product {
        Product {
            id,
            name: self.name,
            price: self.price,
            quantity: self.quantity,
            image: self.image,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Validate for NewProduct {
    fn schema() -> Schema {
        NEW_PRODUCT_SCHEMA
    }
}

/// Partial product update; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductChanges {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub image: Option<String>,
}

impl Validate for ProductChanges {
    fn schema() -> Schema {
        PRODUCT_CHANGES_SCHEMA
    }
}
