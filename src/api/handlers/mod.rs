//! HTTP request handlers.

pub mod auth_handler;
pub mod blog_handler;
pub mod dashboard_handler;
pub mod order_handler;
pub mod product_handler;

pub use auth_handler::auth_routes;
pub use blog_handler::blog_routes;
pub use dashboard_handler::dashboard_routes;
pub use order_handler::order_routes;
pub use product_handler::product_routes;
