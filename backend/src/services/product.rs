//! Product catalog operations

use crate::error::ApiError;
use crate::repositories::ProductRepository;
use catalog_shared::{NewProduct, Product, ProductChanges};
use tracing::info;
use uuid::Uuid;

/// Product service for catalog CRUD
pub struct ProductService;

impl ProductService {
    /// Parse a path id; anything that is not a UUID cannot exist
    pub fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
        Uuid::parse_str(raw).map_err(|_| ApiError::product_not_found())
    }

    pub async fn list(products: &dyn ProductRepository) -> Result<Vec<Product>, ApiError> {
        Ok(products.find_all().await?)
    }

    pub async fn get(products: &dyn ProductRepository, id: Uuid) -> Result<Product, ApiError> {
        products
            .find_by_id(id)
            .await?
            .ok_or_else(ApiError::product_not_found)
    }

    pub async fn create(
        products: &dyn ProductRepository,
        new_product: NewProduct,
    ) -> Result<Product, ApiError> {
        let product = products.create(new_product).await?;
        info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    /// Apply a partial update, then re-read so the response reflects
    /// what was persisted
    pub async fn update(
        products: &dyn ProductRepository,
        id: Uuid,
        changes: ProductChanges,
    ) -> Result<Product, ApiError> {
        if products.update_by_id(id, changes).await?.is_none() {
            return Err(ApiError::product_not_found());
        }

        let product = Self::get(products, id).await?;
        info!(product_id = %product.id, "Product updated");
        Ok(product)
    }

    pub async fn delete(products: &dyn ProductRepository, id: Uuid) -> Result<Product, ApiError> {
        let product = products
            .delete_by_id(id)
            .await?
            .ok_or_else(ApiError::product_not_found)?;

        info!(product_id = %product.id, "Product deleted");
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryProductRepository;

    fn widget() -> NewProduct {
        NewProduct {
            name: "Widget".to_string(),
            price: 9.99,
            quantity: 0,
            image: None,
        }
    }

    #[test]
    fn test_parse_id() {
        assert!(ProductService::parse_id("not-a-uuid").is_err());
        let id = Uuid::new_v4();
        assert_eq!(ProductService::parse_id(&id.to_string()).unwrap(), id);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let repo = InMemoryProductRepository::new();
        let err = ProductService::get(&repo, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_missing_creates_nothing() {
        let repo = InMemoryProductRepository::new();
        let changes = ProductChanges {
            name: Some("Gadget".to_string()),
            ..Default::default()
        };

        let err = ProductService::update(&repo, Uuid::new_v4(), changes)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert!(ProductService::list(&repo).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let repo = InMemoryProductRepository::new();
        let product = ProductService::create(&repo, widget()).await.unwrap();

        ProductService::delete(&repo, product.id).await.unwrap();
        assert!(ProductService::get(&repo, product.id).await.is_err());
        assert!(ProductService::delete(&repo, product.id).await.is_err());
    }
}
