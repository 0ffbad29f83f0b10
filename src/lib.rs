//! Bakeshop API - bakery storefront and back-office server.
//!
//! The storefront (catalog, blog, checkout) is public; order management and
//! content authoring sit behind JWT-authenticated admin accounts. Payments go
//! through Paystack, and an order only becomes `paid` after the transaction
//! reference is re-verified server-side.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and logic
//! - **services**: Application use cases and business logic
//! - **infra**: Infrastructure concerns (database, payment gateway)
//! - **api**: HTTP handlers, extractors, and routes
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Create the initial admin account
//! cargo run -- seed --email admin@example.com --password ...
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Order, OrderStatus, Password, User, UserRole};
pub use errors::{AppError, AppResult};
