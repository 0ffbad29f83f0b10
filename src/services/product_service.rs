//! Product service - catalog reads for the storefront, writes for the admin.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{CreateProduct, Product, UpdateProduct};
use crate::errors::{AppResult, OptionExt};
use crate::infra::repositories::ProductRepository;
use crate::types::ListParams;

/// Product service trait for dependency injection
#[async_trait]
pub trait ProductService: Send + Sync {
    /// List products with the total match count
    async fn list_products(&self, params: &ListParams) -> AppResult<(Vec<Product>, u64)>;

    /// Fetch a single product
    async fn get_product(&self, id: Uuid) -> AppResult<Product>;

    /// Validate and create a product
    async fn create_product(&self, data: CreateProduct) -> AppResult<Product>;

    /// Validate and apply a partial update
    async fn update_product(&self, id: Uuid, data: UpdateProduct) -> AppResult<Product>;

    /// Delete a product
    async fn delete_product(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of ProductService
pub struct ProductManager {
    products: Arc<dyn ProductRepository>,
}

impl ProductManager {
    /// Create new product service instance
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl ProductService for ProductManager {
    async fn list_products(&self, params: &ListParams) -> AppResult<(Vec<Product>, u64)> {
        self.products.list(params).await
    }

    async fn get_product(&self, id: Uuid) -> AppResult<Product> {
        self.products.find_by_id(id).await?.ok_or_not_found()
    }

    async fn create_product(&self, data: CreateProduct) -> AppResult<Product> {
        data.validate()?;
        let product = self.products.create(data).await?;
        tracing::info!(product_id = %product.id, name = %product.name, "Product created");
        Ok(product)
    }

    async fn update_product(&self, id: Uuid, data: UpdateProduct) -> AppResult<Product> {
        data.validate()?;
        self.products.update(id, data).await
    }

    async fn delete_product(&self, id: Uuid) -> AppResult<()> {
        self.products.delete(id).await?;
        tracing::info!(product_id = %id, "Product deleted");
        Ok(())
    }
}
