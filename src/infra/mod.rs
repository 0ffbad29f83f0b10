//! Infrastructure layer - database, repositories, and external gateways.

pub mod db;
pub mod paystack;
pub mod repositories;

pub use db::Database;
pub use paystack::{PaymentGateway, PaymentVerification, PaystackClient};
