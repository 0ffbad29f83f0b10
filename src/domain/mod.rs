//! Domain layer - Core business entities and logic.

pub mod blog;
pub mod cart;
pub mod order;
pub mod password;
pub mod product;
pub mod user;

pub use blog::{BlogPost, CreateBlogPost, MediaType, UpdateBlogPost};
pub use cart::{Cart, CartItem};
pub use order::{
    CreateOrder, Customer, LineItem, NewOrder, Order, OrderStatus, ShippingAddress,
};
pub use password::Password;
pub use product::{CreateProduct, Product, UpdateProduct};
pub use user::{User, UserRole};
