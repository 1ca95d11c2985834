//! # Collection Service
//!
//! The upward API: schema management and schema-checked document CRUD.

mod errors;
mod service;

pub use errors::{ServiceError, ServiceResult};
pub use service::CollectionService;
