//! Application state - dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Database;
use crate::services::{ServiceContainer, Services};

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service container
    pub services: Arc<dyn ServiceContainer>,
    /// Database connection (health checks)
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and config
    pub fn from_config(database: Arc<Database>, config: Config) -> AppResult<Self> {
        let services = Arc::new(Services::from_connection(database.get_connection(), config)?);

        Ok(Self { services, database })
    }

    /// Create application state with manually injected services (tests)
    pub fn new(services: Arc<dyn ServiceContainer>, database: Arc<Database>) -> Self {
        Self { services, database }
    }
}
