//! Shared types for DRY compliance.

mod pagination;
mod response;

pub use pagination::{Paginated, PaginatedPatients, PaginationMeta};
pub use response::{ApiResponse, Created};
