//! Repository layer - data access over SeaORM.
//!
//! Each repository is a trait the services depend on, with one concrete
//! `*Store` implementation per aggregate. Tests substitute in-memory
//! implementations of the same traits.

pub mod blog_repository;
pub mod entities;
pub mod order_repository;
pub mod product_repository;
pub mod user_repository;

pub use blog_repository::{BlogRepository, BlogStore};
pub use order_repository::{DailySales, OrderRepository, OrderStore};
pub use product_repository::{ProductRepository, ProductStore};
pub use user_repository::{NewUser, UserRepository, UserStore};

// Export mocks for unit tests
#[cfg(test)]
pub use blog_repository::MockBlogRepository;
#[cfg(test)]
pub use order_repository::MockOrderRepository;
#[cfg(test)]
pub use product_repository::MockProductRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
