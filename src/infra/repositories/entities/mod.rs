//! SeaORM entity definitions
//!
//! These are database-specific models separate from the domain entities.

pub mod blog_post;
pub mod order;
pub mod order_item;
pub mod product;
pub mod user;
