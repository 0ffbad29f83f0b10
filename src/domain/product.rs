//! Product catalog entity.
//!
//! Products are read-only from the order workflow's perspective: line items
//! reference a product id but snapshot name and price at order time.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Catalog product
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Unit price in kobo
    pub price: i64,
    pub image_urls: Vec<String>,
    pub category: String,
}

/// Product creation payload (admin)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[validate(length(min = 1, message = "Product name is required"))]
    #[schema(example = "Sourdough Loaf")]
    pub name: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    /// Unit price in kobo
    #[validate(range(min = 0, message = "Price cannot be negative"))]
    #[schema(example = 350000)]
    pub price: i64,
    #[validate(length(min = 1, message = "At least one image is required"))]
    pub image_urls: Vec<String>,
    #[validate(length(min = 1, message = "Category is required"))]
    #[schema(example = "bread")]
    pub category: String,
}

/// Product update payload (admin); absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[validate(length(min = 1, message = "Product name cannot be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price: Option<i64>,
    pub image_urls: Option<Vec<String>>,
    pub category: Option<String>,
}
