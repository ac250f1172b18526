//! Product persistence

use super::{unavailable, ProductRepository, StoreResult};
use async_trait::async_trait;
use catalog_shared::{NewProduct, Product, ProductChanges, StoreError};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Product record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRecord {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        Product {
            id: record.id,
            name: record.name,
            price: record.price,
            quantity: record.quantity,
            image: record.image,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

const PRODUCT_COLUMNS: &str = "id, name, price, quantity, image, created_at, updated_at";

/// PostgreSQL-backed product repository
#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, product: NewProduct) -> StoreResult<Product> {
        let record = sqlx::query_as::<_, ProductRecord>(&format!(
            r#"
            INSERT INTO products (id, name, price, quantity, image)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&product.name)
        .bind(product.price)
        .bind(product.quantity)
        .bind(&product.image)
        .fetch_one(&self.pool)
        .await
        .map_err(unavailable)?;

        Ok(record.into())
    }

    async fn find_all(&self) -> StoreResult<Vec<Product>> {
        let records = sqlx::query_as::<_, ProductRecord>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(unavailable)?;

        Ok(records.into_iter().map(Product::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Product>> {
        let record = sqlx::query_as::<_, ProductRecord>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unavailable)?;

        Ok(record.map(Product::from))
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        changes: ProductChanges,
    ) -> StoreResult<Option<Product>> {
        let record = sqlx::query_as::<_, ProductRecord>(&format!(
            r#"
            UPDATE products SET
                name = COALESCE($2, name),
                price = COALESCE($3, price),
                quantity = COALESCE($4, quantity),
                image = COALESCE($5, image),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(changes.name)
        .bind(changes.price)
        .bind(changes.quantity)
        .bind(changes.image)
        .fetch_optional(&self.pool)
        .await
        .map_err(unavailable)?;

        Ok(record.map(Product::from))
    }

    async fn delete_by_id(&self, id: Uuid) -> StoreResult<Option<Product>> {
        let record = sqlx::query_as::<_, ProductRecord>(&format!(
            "DELETE FROM products WHERE id = $1 RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unavailable)?;

        Ok(record.map(Product::from))
    }

    async fn ping(&self) -> StoreResult<()> {
        crate::db::health_check(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

/// In-memory product repository for tests and local runs
#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<HashMap<Uuid, Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: NewProduct) -> StoreResult<Product> {
        let product = product.into_product(Uuid::new_v4(), Utc::now());
        self.products
            .write()
            .await
            .insert(product.id, product.clone());
        Ok(product)
    }

    async fn find_all(&self) -> StoreResult<Vec<Product>> {
        let mut products: Vec<Product> = self.products.read().await.values().cloned().collect();
        products.sort_by_key(|p| p.created_at);
        Ok(products)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Product>> {
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        changes: ProductChanges,
    ) -> StoreResult<Option<Product>> {
        let mut products = self.products.write().await;
        Ok(products.get_mut(&id).map(|product| {
            product.apply(changes, Utc::now());
            product.clone()
        }))
    }

    async fn delete_by_id(&self, id: Uuid) -> StoreResult<Option<Product>> {
        Ok(self.products.write().await.remove(&id))
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> NewProduct {
        NewProduct {
            name: "Widget".to_string(),
            price: 9.99,
            quantity: 0,
            image: None,
        }
    }

    #[tokio::test]
    async fn test_crud_cycle() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create(widget()).await.unwrap();
        assert_eq!(repo.find_all().await.unwrap().len(), 1);

        let updated = repo
            .update_by_id(
                created.id,
                ProductChanges {
                    quantity: Some(4),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.quantity, 4);
        assert_eq!(updated.name, "Widget");
        assert!(updated.updated_at >= created.updated_at);

        let deleted = repo.delete_by_id(created.id).await.unwrap();
        assert_eq!(deleted.map(|p| p.id), Some(created.id));
        assert!(repo.find_by_id(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_ids_return_none() {
        let repo = InMemoryProductRepository::new();
        let id = Uuid::new_v4();

        assert!(repo.find_by_id(id).await.unwrap().is_none());
        assert!(repo
            .update_by_id(id, ProductChanges::default())
            .await
            .unwrap()
            .is_none());
        assert!(repo.delete_by_id(id).await.unwrap().is_none());
        assert!(repo.find_all().await.unwrap().is_empty());
    }
}
