//! Common types used across the application.

pub mod pagination;

pub use pagination::{MAX_PER_PAGE, PageRequest, PageResponse};
