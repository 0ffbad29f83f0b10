//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, blog_handler, dashboard_handler, order_handler, product_handler,
};
use crate::domain::{
    BlogPost, CreateBlogPost, CreateOrder, CreateProduct, Customer, LineItem, MediaType, Order,
    OrderStatus, Product, ShippingAddress, UpdateBlogPost, UpdateProduct, UserRole,
};
use crate::services::{DashboardStats, TokenResponse};

/// OpenAPI documentation for the Bakeshop API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bakeshop API",
        version = "0.1.0",
        description = "Bakery storefront and back-office API with verified Paystack payments",
        contact(name = "API Support", email = "support@example.com")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::login,
        // Order endpoints
        order_handler::create_order,
        order_handler::verify_payment,
        order_handler::list_orders,
        order_handler::get_order,
        order_handler::update_order_status,
        // Product endpoints
        product_handler::list_products,
        product_handler::get_product,
        product_handler::create_product,
        product_handler::update_product,
        product_handler::delete_product,
        // Blog endpoints
        blog_handler::list_posts,
        blog_handler::get_post,
        blog_handler::get_post_by_slug,
        blog_handler::create_post,
        blog_handler::update_post,
        blog_handler::delete_post,
        // Dashboard endpoints
        dashboard_handler::dashboard_stats,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            Order,
            OrderStatus,
            Customer,
            ShippingAddress,
            LineItem,
            CreateOrder,
            Product,
            CreateProduct,
            UpdateProduct,
            BlogPost,
            MediaType,
            CreateBlogPost,
            UpdateBlogPost,
            DashboardStats,
            // Auth types
            auth_handler::LoginRequest,
            TokenResponse,
            // Order handler types
            order_handler::VerifyPaymentRequest,
            order_handler::UpdateOrderStatusRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Admin login"),
        (name = "Orders", description = "Checkout, payment verification and order management"),
        (name = "Products", description = "Catalog operations"),
        (name = "Blog", description = "Blog post operations"),
        (name = "Dashboard", description = "Back-office statistics")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
