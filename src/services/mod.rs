//! Service layer - business logic behind the HTTP surface.

pub mod auth_service;
pub mod blog_service;
pub mod container;
pub mod dashboard_service;
pub mod order_service;
pub mod product_service;

pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use blog_service::{BlogManager, BlogService};
pub use container::{ServiceContainer, Services};
pub use dashboard_service::{DashboardManager, DashboardService, DashboardStats, DateRange};
pub use order_service::{OrderManager, OrderService};
pub use product_service::{ProductManager, ProductService};
