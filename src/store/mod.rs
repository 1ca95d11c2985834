//! # Storage Collaborators
//!
//! Contracts for persisting schemas and documents, with an in-memory and a
//! JSON-file implementation of each. Store calls are synchronous; failures
//! surface as `StoreError::Unavailable` and are never retried here.

mod errors;
mod file;
mod memory;

pub use errors::{StoreError, StoreResult};
pub use file::{FileDocumentStore, FileSchemaStore};
pub use memory::{MemDocumentStore, MemSchemaStore};

use crate::document::{DocumentData, DocumentUpdate, DynamicDocument, FieldFilter};
use crate::schema::CollectionSchema;

/// Durable storage for collection schemas, keyed by collection name
pub trait SchemaStore: Send + Sync + std::fmt::Debug {
    /// Insert a schema whose name is not yet taken, atomically.
    ///
    /// Returns `StoreError::DuplicateKey` if the name exists.
    fn insert_unique(&self, schema: CollectionSchema) -> StoreResult<CollectionSchema>;

    /// Find a schema by collection name
    fn find_by_name(&self, name: &str) -> StoreResult<Option<CollectionSchema>>;

    /// Insert or replace a schema
    fn save(&self, schema: CollectionSchema) -> StoreResult<CollectionSchema>;

    /// Delete a schema; absent names are not an error
    fn delete_by_name(&self, name: &str) -> StoreResult<()>;

    /// All schemas, in no particular order
    fn list_all(&self) -> StoreResult<Vec<CollectionSchema>>;
}

/// Durable storage for documents, partitioned by collection name
pub trait DocumentStore: Send + Sync + std::fmt::Debug {
    /// Store new data, assigning id and timestamps
    fn insert(&self, collection: &str, data: DocumentData) -> StoreResult<DynamicDocument>;

    /// Find a document by id
    fn find_by_id(&self, collection: &str, id: &str) -> StoreResult<Option<DynamicDocument>>;

    /// All documents of a collection
    fn find_all(&self, collection: &str) -> StoreResult<Vec<DynamicDocument>>;

    /// Documents whose data satisfies every predicate of the filter
    fn find_where(&self, collection: &str, filter: &FieldFilter)
        -> StoreResult<Vec<DynamicDocument>>;

    /// Replace a document's data and updated timestamp. Returns the number
    /// of documents affected.
    fn update_fields(&self, collection: &str, id: &str, update: DocumentUpdate)
        -> StoreResult<u64>;

    /// Delete a document. Returns the number of documents removed.
    fn delete_by_id(&self, collection: &str, id: &str) -> StoreResult<u64>;

    /// Remove a collection and all its documents
    fn drop_collection(&self, collection: &str) -> StoreResult<()>;
}
