//! Order handlers - checkout, payment verification, and the admin back office.
//!
//! `POST /orders` and `PUT /orders` are the storefront's checkout path and
//! need no authentication. Listing, fetching, and status changes are
//! admin-only. The status field on a checkout payload is honored only when
//! the caller is an authenticated admin; anonymous orders always start
//! `pending`.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::{CurrentUser, ValidatedJson};
use crate::api::AppState;
use crate::domain::{CreateOrder, Order, OrderStatus};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created, ListParams, Paginated};

/// Payment verification request: the gateway reference reported by the
/// client-side checkout callback
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentRequest {
    pub order_id: Uuid,
    #[validate(length(min = 1, message = "Payment reference is required"))]
    #[schema(example = "T685312322670487")]
    pub reference: String,
}

/// Order status update request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

/// Create order routes
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(create_order).put(verify_payment).get(list_orders),
        )
        .route("/:id", get(get_order).put(update_order_status))
}

/// Create an order (public checkout or admin manual entry)
#[utoipa::path(
    post,
    path = "/orders",
    tag = "Orders",
    request_body = CreateOrder,
    responses(
        (status = 201, description = "Order created", body = Order),
        (status = 400, description = "Validation error or total mismatch")
    )
)]
pub async fn create_order(
    State(state): State<AppState>,
    user: Option<CurrentUser>,
    ValidatedJson(mut payload): ValidatedJson<CreateOrder>,
) -> AppResult<Created<Order>> {
    // Only an authenticated admin may choose the initial status
    let is_admin = user.map(|u| u.role.is_admin()).unwrap_or(false);
    if !is_admin {
        payload.status = None;
    }

    let order = state.services.orders().create_order(payload).await?;
    Ok(Created(order))
}

/// Verify a payment and mark the order paid
#[utoipa::path(
    put,
    path = "/orders",
    tag = "Orders",
    request_body = VerifyPaymentRequest,
    responses(
        (status = 200, description = "Payment verified, order is paid", body = Order),
        (status = 402, description = "Gateway did not confirm the payment"),
        (status = 404, description = "Order not found"),
        (status = 502, description = "Payment provider unreachable")
    )
)]
pub async fn verify_payment(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<VerifyPaymentRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = state
        .services
        .orders()
        .verify_payment(payload.order_id, &payload.reference)
        .await?;

    Ok(Json(ApiResponse::success(order)))
}

/// List orders (admin)
#[utoipa::path(
    get,
    path = "/orders",
    tag = "Orders",
    params(
        ("page" = Option<u64>, Query, description = "Page number (1-indexed)"),
        ("limit" = Option<u64>, Query, description = "Items per page"),
        ("search" = Option<String>, Query, description = "Customer name or email filter")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Paginated orders"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn list_orders(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Paginated<Order>>> {
    user.require_admin()?;

    let (orders, total) = state.services.orders().list_orders(&params).await?;
    Ok(Json(Paginated::new(
        orders,
        params.page,
        params.limit(),
        total,
    )))
}

/// Fetch a single order (admin)
#[utoipa::path(
    get,
    path = "/orders/{id}",
    tag = "Orders",
    params(("id" = Uuid, Path, description = "Order id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Order", body = Order),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn get_order(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Order>>> {
    user.require_admin()?;

    let order = state.services.orders().get_order(id).await?;
    Ok(Json(ApiResponse::success(order)))
}

/// Update an order's lifecycle status (admin)
#[utoipa::path(
    put,
    path = "/orders/{id}",
    tag = "Orders",
    params(("id" = Uuid, Path, description = "Order id")),
    request_body = UpdateOrderStatusRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Updated order", body = Order),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    user.require_admin()?;

    let order = state
        .services
        .orders()
        .update_status(id, payload.status)
        .await?;
    Ok(Json(ApiResponse::success(order)))
}
