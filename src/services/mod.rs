//! Services Layer
//!
//! Pure business logic behind the HTTP handlers: catalog queries, review
//! submission and the cart merge, all speaking `ServiceError` rather than
//! status codes.

pub mod cart_service;
pub mod catalog_service;
pub mod error;
pub mod pagination;
pub mod review_service;

pub use error::ServiceError;
pub use pagination::{PageParams, Pagination};
