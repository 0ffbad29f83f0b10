//! Integration tests for API endpoints.
//!
//! These tests use stub services to exercise routing, extractors, and the
//! response envelopes without a database or a live payment gateway.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::Utc;
use http_body_util::BodyExt;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use bakeshop_api::api::{create_router, AppState};
use bakeshop_api::domain::{
    BlogPost, CreateBlogPost, CreateOrder, CreateProduct, MediaType, Order, OrderStatus, Product,
    UpdateBlogPost, UpdateProduct,
};
use bakeshop_api::errors::{AppError, AppResult};
use bakeshop_api::infra::Database;
use bakeshop_api::services::{
    AuthService, BlogService, Claims, DashboardService, DashboardStats, DateRange, OrderService,
    ProductService, ServiceContainer, TokenResponse,
};
use bakeshop_api::types::ListParams;

// =============================================================================
// Stub services
// =============================================================================

const ADMIN_TOKEN: &str = "admin-test-token";
const USER_TOKEN: &str = "user-test-token";

struct StubAuthService;

#[async_trait]
impl AuthService for StubAuthService {
    async fn login(&self, _email: String, _password: String) -> AppResult<TokenResponse> {
        Ok(TokenResponse {
            access_token: ADMIN_TOKEN.to_string(),
            token_type: "Bearer".to_string(),
            expires_in: 86400,
        })
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let role = match token {
            ADMIN_TOKEN => "admin",
            USER_TOKEN => "user",
            _ => return Err(AppError::Unauthorized),
        };
        Ok(Claims {
            sub: Uuid::new_v4(),
            email: "someone@example.com".to_string(),
            role: role.to_string(),
            exp: Utc::now().timestamp() + 3600,
            iat: Utc::now().timestamp(),
        })
    }
}

struct StubOrderService;

fn stub_order(id: Uuid, status: OrderStatus, reference: Option<&str>) -> Order {
    let payload = checkout_payload();
    Order {
        id,
        customer: serde_json::from_value(payload["customer"].clone()).unwrap(),
        shipping_address: serde_json::from_value(payload["shippingAddress"].clone()).unwrap(),
        items: serde_json::from_value(payload["items"].clone()).unwrap(),
        total_amount: 2500,
        status,
        payment_reference: reference.map(str::to_string),
        notes: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[async_trait]
impl OrderService for StubOrderService {
    async fn create_order(&self, data: CreateOrder) -> AppResult<Order> {
        let mut order = stub_order(Uuid::new_v4(), OrderStatus::Pending, None);
        // Echo what the handler let through
        order.status = data.status.unwrap_or(OrderStatus::Pending);
        Ok(order)
    }

    async fn get_order(&self, id: Uuid) -> AppResult<Order> {
        Ok(stub_order(id, OrderStatus::Pending, None))
    }

    async fn list_orders(&self, params: &ListParams) -> AppResult<(Vec<Order>, u64)> {
        let orders = vec![stub_order(Uuid::new_v4(), OrderStatus::Pending, None)];
        let _ = params;
        Ok((orders, 1))
    }

    async fn update_status(&self, id: Uuid, status: OrderStatus) -> AppResult<Order> {
        Ok(stub_order(id, status, None))
    }

    async fn verify_payment(&self, id: Uuid, reference: &str) -> AppResult<Order> {
        if reference == "declined-ref" {
            return Err(AppError::GatewayVerificationFailed);
        }
        Ok(stub_order(id, OrderStatus::Paid, Some(reference)))
    }
}

struct StubProductService;

#[async_trait]
impl ProductService for StubProductService {
    async fn list_products(&self, _params: &ListParams) -> AppResult<(Vec<Product>, u64)> {
        Ok((vec![], 0))
    }

    async fn get_product(&self, _id: Uuid) -> AppResult<Product> {
        Err(AppError::NotFound)
    }

    async fn create_product(&self, data: CreateProduct) -> AppResult<Product> {
        Ok(Product {
            id: Uuid::new_v4(),
            name: data.name,
            description: data.description,
            price: data.price,
            image_urls: data.image_urls,
            category: data.category,
        })
    }

    async fn update_product(&self, _id: Uuid, _data: UpdateProduct) -> AppResult<Product> {
        Err(AppError::NotFound)
    }

    async fn delete_product(&self, _id: Uuid) -> AppResult<()> {
        Ok(())
    }
}

struct StubBlogService;

fn stub_post() -> BlogPost {
    BlogPost {
        id: Uuid::new_v4(),
        title: "Our New Sourdough Range".to_string(),
        slug: "our-new-sourdough-range".to_string(),
        content: "Content".to_string(),
        excerpt: "Teaser".to_string(),
        featured_media_url: "https://cdn.example.com/banner.jpg".to_string(),
        media_type: MediaType::Image,
        author_id: Uuid::new_v4(),
        author_name: Some("Administrator".to_string()),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[async_trait]
impl BlogService for StubBlogService {
    async fn list_posts(&self, _params: &ListParams) -> AppResult<(Vec<BlogPost>, u64)> {
        Ok((vec![stub_post()], 1))
    }

    async fn get_post(&self, _id: Uuid) -> AppResult<BlogPost> {
        Ok(stub_post())
    }

    async fn get_post_by_slug(&self, slug: &str) -> AppResult<BlogPost> {
        if slug == "our-new-sourdough-range" {
            Ok(stub_post())
        } else {
            Err(AppError::NotFound)
        }
    }

    async fn create_post(&self, _author_id: Uuid, _data: CreateBlogPost) -> AppResult<BlogPost> {
        Ok(stub_post())
    }

    async fn update_post(&self, _id: Uuid, _data: UpdateBlogPost) -> AppResult<BlogPost> {
        Ok(stub_post())
    }

    async fn delete_post(&self, _id: Uuid) -> AppResult<()> {
        Ok(())
    }
}

struct StubDashboardService;

#[async_trait]
impl DashboardService for StubDashboardService {
    async fn stats(&self, _range: DateRange) -> AppResult<DashboardStats> {
        Ok(DashboardStats {
            total_products: 3,
            total_orders: 7,
            total_revenue: 1_250_000,
            recent_orders: vec![],
            sales_data: vec![],
        })
    }
}

struct StubServices;

impl ServiceContainer for StubServices {
    fn auth(&self) -> Arc<dyn AuthService> {
        Arc::new(StubAuthService)
    }

    fn orders(&self) -> Arc<dyn OrderService> {
        Arc::new(StubOrderService)
    }

    fn products(&self) -> Arc<dyn ProductService> {
        Arc::new(StubProductService)
    }

    fn blogs(&self) -> Arc<dyn BlogService> {
        Arc::new(StubBlogService)
    }

    fn dashboard(&self) -> Arc<dyn DashboardService> {
        Arc::new(StubDashboardService)
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn test_app() -> axum::Router {
    let state = AppState::new(
        Arc::new(StubServices),
        Arc::new(Database::from_connection(DatabaseConnection::Disconnected)),
    );
    create_router(state)
}

fn checkout_payload() -> Value {
    json!({
        "customer": {
            "name": "Ada Okafor",
            "email": "ada@example.com",
            "phone": "+2348012345678"
        },
        "shippingAddress": {
            "street": "1 Allen Ave",
            "city": "Ikeja",
            "state": "Lagos",
            "postalCode": "100001",
            "country": "Nigeria"
        },
        "items": [
            {"productId": Uuid::new_v4(), "name": "Sourdough Loaf", "price": 1000, "quantity": 2},
            {"productId": Uuid::new_v4(), "name": "Cinnamon Roll", "price": 500, "quantity": 1}
        ],
        "totalAmount": 2500
    })
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn authed_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn root_responds() {
    let response = test_app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn health_reports_degraded_without_database() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = body_json(response).await;
    assert_eq!(body["status"], "degraded");
}

#[tokio::test]
async fn anonymous_checkout_is_created_pending() {
    let mut payload = checkout_payload();
    // A tampering client asserting its own status is ignored
    payload["status"] = json!("paid");

    let response = test_app()
        .oneshot(json_request("POST", "/orders", payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "pending");
}

#[tokio::test]
async fn admin_checkout_may_set_status() {
    let mut payload = checkout_payload();
    payload["status"] = json!("paid");

    let request = Request::builder()
        .method("POST")
        .uri("/orders")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", ADMIN_TOKEN))
        .body(Body::from(payload.to_string()))
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["data"]["status"], "paid");
}

#[tokio::test]
async fn checkout_without_email_is_rejected() {
    let mut payload = checkout_payload();
    payload["customer"]["email"] = json!("");

    let response = test_app()
        .oneshot(json_request("POST", "/orders", payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn payment_verification_returns_the_paid_order() {
    let payload = json!({
        "orderId": Uuid::new_v4(),
        "reference": "T685312322670487"
    });

    let response = test_app()
        .oneshot(json_request("PUT", "/orders", payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "paid");
    assert_eq!(body["data"]["paymentReference"], "T685312322670487");
}

#[tokio::test]
async fn declined_payment_maps_to_402() {
    let payload = json!({
        "orderId": Uuid::new_v4(),
        "reference": "declined-ref"
    });

    let response = test_app()
        .oneshot(json_request("PUT", "/orders", payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "PAYMENT_VERIFICATION_FAILED");
}

#[tokio::test]
async fn order_listing_requires_authentication() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/orders")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn order_listing_requires_admin_role() {
    let response = test_app()
        .oneshot(authed_request("GET", "/orders", USER_TOKEN))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_sees_paginated_orders() {
    let response = test_app()
        .oneshot(authed_request("GET", "/orders?page=1&limit=10", ADMIN_TOKEN))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["pagination"]["currentPage"], 1);
    assert_eq!(body["pagination"]["totalItems"], 1);
    assert_eq!(body["pagination"]["totalPages"], 1);
}

#[tokio::test]
async fn blog_posts_are_public_by_slug() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/blogs/slug/our-new-sourdough-range")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["slug"], "our-new-sourdough-range");
    assert_eq!(body["data"]["authorName"], "Administrator");
}

#[tokio::test]
async fn unknown_slug_is_404() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/blogs/slug/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dashboard_requires_admin() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/dashboard-stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = test_app()
        .oneshot(authed_request("GET", "/dashboard-stats?range=7d", ADMIN_TOKEN))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["totalOrders"], 7);
    assert_eq!(body["data"]["totalRevenue"], 1_250_000);
}

#[tokio::test]
async fn product_creation_requires_admin() {
    let payload = json!({
        "name": "Sourdough Loaf",
        "description": "Naturally leavened",
        "price": 350000,
        "imageUrls": ["https://cdn.example.com/sourdough.jpg"],
        "category": "bread"
    });

    let response = test_app()
        .oneshot(json_request("POST", "/products", payload.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let request = Request::builder()
        .method("POST")
        .uri("/products")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", ADMIN_TOKEN))
        .body(Body::from(payload.to_string()))
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}
