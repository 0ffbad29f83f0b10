//! Service container - centralized service access.
//!
//! Handlers depend on the container trait, never on concrete services, so
//! tests can substitute stub implementations without a database.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, BlogManager, BlogService, DashboardManager, DashboardService,
    OrderManager, OrderService, ProductManager, ProductService,
};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::repositories::{BlogStore, OrderStore, ProductStore, UserStore};
use crate::infra::PaystackClient;

/// Service container trait for dependency injection
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get order service
    fn orders(&self) -> Arc<dyn OrderService>;

    /// Get product service
    fn products(&self) -> Arc<dyn ProductService>;

    /// Get blog service
    fn blogs(&self) -> Arc<dyn BlogService>;

    /// Get dashboard service
    fn dashboard(&self) -> Arc<dyn DashboardService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    order_service: Arc<dyn OrderService>,
    product_service: Arc<dyn ProductService>,
    blog_service: Arc<dyn BlogService>,
    dashboard_service: Arc<dyn DashboardService>,
}

impl Services {
    /// Create a new service container from pre-built services
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        order_service: Arc<dyn OrderService>,
        product_service: Arc<dyn ProductService>,
        blog_service: Arc<dyn BlogService>,
        dashboard_service: Arc<dyn DashboardService>,
    ) -> Self {
        Self {
            auth_service,
            order_service,
            product_service,
            blog_service,
            dashboard_service,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> AppResult<Self> {
        let users = Arc::new(UserStore::new(db.clone()));
        let orders: Arc<OrderStore> = Arc::new(OrderStore::new(db.clone()));
        let products: Arc<ProductStore> = Arc::new(ProductStore::new(db.clone()));
        let blogs = Arc::new(BlogStore::new(db));
        let gateway = Arc::new(PaystackClient::new(&config)?);

        Ok(Self {
            auth_service: Arc::new(Authenticator::new(users, config)),
            order_service: Arc::new(OrderManager::new(orders.clone(), products.clone(), gateway)),
            product_service: Arc::new(ProductManager::new(products.clone())),
            blog_service: Arc::new(BlogManager::new(blogs)),
            dashboard_service: Arc::new(DashboardManager::new(orders, products)),
        })
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn orders(&self) -> Arc<dyn OrderService> {
        self.order_service.clone()
    }

    fn products(&self) -> Arc<dyn ProductService> {
        self.product_service.clone()
    }

    fn blogs(&self) -> Arc<dyn BlogService> {
        self.blog_service.clone()
    }

    fn dashboard(&self) -> Arc<dyn DashboardService> {
        self.dashboard_service.clone()
    }
}
