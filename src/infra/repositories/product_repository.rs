//! Product repository - catalog storage.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::product;
use crate::domain::{CreateProduct, Product, UpdateProduct};
use crate::errors::{AppError, AppResult};
use crate::types::ListParams;

/// Product repository trait for dependency injection
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// List products alphabetically, filtered by name substring
    /// (case-insensitive), with the total match count
    async fn list(&self, params: &ListParams) -> AppResult<(Vec<Product>, u64)>;

    /// Find a product by id
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>>;

    /// Create a new product
    async fn create(&self, data: CreateProduct) -> AppResult<Product>;

    /// Apply a partial update to a product
    async fn update(&self, id: Uuid, data: UpdateProduct) -> AppResult<Product>;

    /// Delete a product
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Total number of products
    async fn count(&self) -> AppResult<u64>;
}

/// Concrete implementation of ProductRepository over SeaORM
pub struct ProductStore {
    db: DatabaseConnection,
}

impl ProductStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for ProductStore {
    async fn list(&self, params: &ListParams) -> AppResult<(Vec<Product>, u64)> {
        let mut query = product::Entity::find().order_by_asc(product::Column::Name);

        if let Some(term) = params.search_term() {
            let pattern = format!("%{}%", term.to_lowercase());
            query = query
                .filter(Expr::expr(Func::lower(Expr::col(product::Column::Name))).like(pattern));
        }

        let paginator = query.paginate(&self.db, params.limit());
        let total = paginator.num_items().await.map_err(AppError::from)?;
        let rows = paginator
            .fetch_page(params.page.saturating_sub(1))
            .await
            .map_err(AppError::from)?;

        Ok((rows.into_iter().map(Product::from).collect(), total))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>> {
        let row = product::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(row.map(Product::from))
    }

    async fn create(&self, data: CreateProduct) -> AppResult<Product> {
        let now = Utc::now();
        let model = product::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(data.name),
            description: Set(data.description),
            price: Set(data.price),
            image_urls: Set(serde_json::json!(data.image_urls)),
            category: Set(data.category),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let stored = model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Product::from(stored))
    }

    async fn update(&self, id: Uuid, data: UpdateProduct) -> AppResult<Product> {
        let row = product::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound)?;

        let mut active: product::ActiveModel = row.into();
        if let Some(name) = data.name {
            active.name = Set(name);
        }
        if let Some(description) = data.description {
            active.description = Set(description);
        }
        if let Some(price) = data.price {
            active.price = Set(price);
        }
        if let Some(image_urls) = data.image_urls {
            active.image_urls = Set(serde_json::json!(image_urls));
        }
        if let Some(category) = data.category {
            active.category = Set(category);
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Product::from(updated))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = product::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn count(&self) -> AppResult<u64> {
        product::Entity::find()
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }
}
