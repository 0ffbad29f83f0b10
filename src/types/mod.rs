//! Shared request/response types.

mod pagination;
mod response;

pub use pagination::{ListParams, Paginated, PaginationMeta};
pub use response::{ApiResponse, Created, NoContent};
