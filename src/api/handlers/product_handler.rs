//! Product handlers - public catalog reads, admin writes.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use uuid::Uuid;

use crate::api::extractors::{CurrentUser, ValidatedJson};
use crate::api::AppState;
use crate::domain::{CreateProduct, Product, UpdateProduct};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created, ListParams, NoContent, Paginated};

/// Create product routes
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// List products (public)
#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    params(
        ("page" = Option<u64>, Query, description = "Page number (1-indexed)"),
        ("limit" = Option<u64>, Query, description = "Items per page"),
        ("search" = Option<String>, Query, description = "Product name filter")
    ),
    responses((status = 200, description = "Paginated products"))
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Paginated<Product>>> {
    let (products, total) = state.services.products().list_products(&params).await?;
    Ok(Json(Paginated::new(
        products,
        params.page,
        params.limit(),
        total,
    )))
}

/// Fetch a single product (public)
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product", body = Product),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let product = state.services.products().get_product(id).await?;
    Ok(Json(ApiResponse::success(product)))
}

/// Create a product (admin)
#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    request_body = CreateProduct,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateProduct>,
) -> AppResult<Created<Product>> {
    user.require_admin()?;

    let product = state.services.products().create_product(payload).await?;
    Ok(Created(product))
}

/// Update a product (admin)
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product id")),
    request_body = UpdateProduct,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Updated product", body = Product),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateProduct>,
) -> AppResult<Json<ApiResponse<Product>>> {
    user.require_admin()?;

    let product = state
        .services
        .products()
        .update_product(id, payload)
        .await?;
    Ok(Json(ApiResponse::success(product)))
}

/// Delete a product (admin)
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    user.require_admin()?;

    state.services.products().delete_product(id).await?;
    Ok(NoContent)
}
