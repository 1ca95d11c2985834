//! # flexdb
//!
//! A schema-driven dynamic document store. Collections are declared at
//! runtime by a `CollectionSchema`; every document write is validated
//! against its collection's schema, defaults are filled on create, and
//! partial updates are merged and revalidated.
//!
//! - `schema`: field types, constraints, the validator and the registry
//! - `document`: documents, default/merge rules and equality filters
//! - `store`: storage contracts with in-memory and JSON-file backends
//! - `service`: `CollectionService`, the API callers bind to
//! - `config`, `observability`, `cli`: the process around it

pub mod cli;
pub mod config;
pub mod document;
pub mod observability;
pub mod schema;
pub mod service;
pub mod store;
