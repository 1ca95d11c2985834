//! # Collection Service
//!
//! Ties the schema registry, validator, merge engine and document store
//! together. Every call runs synchronously end to end; the only blocking
//! work is inside the stores.

use std::sync::Arc;

use super::errors::{ServiceError, ServiceResult};
use crate::config::{Config, StorageKind};
use crate::document::{
    apply_defaults, merge_for_update, DocumentData, DocumentUpdate, DynamicDocument, FieldFilter,
};
use crate::observability::{log_event_with_fields, Event, MetricsRegistry};
use crate::schema::{
    join_violations, validate, CollectionSchema, FieldDefinition, SchemaRegistry,
};
use crate::store::{
    DocumentStore, FileDocumentStore, FileSchemaStore, MemDocumentStore, MemSchemaStore,
};

/// Schema-checked CRUD over dynamic collections
#[derive(Debug, Clone)]
pub struct CollectionService {
    registry: SchemaRegistry,
    documents: Arc<dyn DocumentStore>,
    metrics: Arc<MetricsRegistry>,
}

impl CollectionService {
    pub fn new(registry: SchemaRegistry, documents: Arc<dyn DocumentStore>) -> Self {
        Self {
            registry,
            documents,
            metrics: Arc::new(MetricsRegistry::new()),
        }
    }

    /// Service over fresh in-memory stores
    pub fn in_memory() -> Self {
        Self::new(
            SchemaRegistry::new(Arc::new(MemSchemaStore::new())),
            Arc::new(MemDocumentStore::new()),
        )
    }

    /// Service over the stores named by the configuration
    pub fn open(config: &Config) -> Self {
        match config.storage {
            StorageKind::Memory => Self::in_memory(),
            StorageKind::File => Self::new(
                SchemaRegistry::new(Arc::new(FileSchemaStore::new(config.data_path()))),
                Arc::new(FileDocumentStore::new(config.data_path())),
            ),
        }
    }

    /// Counters for this instance
    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }

    // ==================
    // Schemas
    // ==================

    /// Register a new collection schema.
    ///
    /// # Errors
    ///
    /// `DuplicateSchema` if the collection name is taken.
    pub fn create_schema(&self, schema: CollectionSchema) -> ServiceResult<CollectionSchema> {
        let stored = observe("create_schema", self.registry.create(schema).map_err(Into::into))?;

        self.metrics.increment_schemas_created();
        let field_count = stored.fields.len().to_string();
        log_event_with_fields(
            Event::SchemaCreated,
            &[
                ("collection", stored.collection_name.as_str()),
                ("fields", field_count.as_str()),
            ],
        );
        Ok(stored)
    }

    pub fn get_schema(&self, collection_name: &str) -> ServiceResult<Option<CollectionSchema>> {
        observe("get_schema", self.registry.get(collection_name).map_err(Into::into))
    }

    pub fn list_schemas(&self) -> ServiceResult<Vec<CollectionSchema>> {
        observe("list_schemas", self.registry.list_all().map_err(Into::into))
    }

    /// Replace the field list of an existing schema.
    ///
    /// Stored documents are not revalidated.
    pub fn update_schema(
        &self,
        collection_name: &str,
        fields: Vec<FieldDefinition>,
    ) -> ServiceResult<CollectionSchema> {
        let updated = observe(
            "update_schema",
            self.registry
                .update(collection_name, fields)
                .map_err(Into::into),
        )?;

        let field_count = updated.fields.len().to_string();
        log_event_with_fields(
            Event::SchemaUpdated,
            &[
                ("collection", collection_name),
                ("fields", field_count.as_str()),
            ],
        );
        Ok(updated)
    }

    /// Remove a schema and drop its collection.
    ///
    /// Returns `false` when no schema was registered under the name; nothing
    /// is dropped in that case.
    pub fn delete_schema(&self, collection_name: &str) -> ServiceResult<bool> {
        let removed = observe(
            "delete_schema",
            self.registry.delete(collection_name).map_err(Into::into),
        )?;
        if !removed {
            return Ok(false);
        }

        observe(
            "drop_collection",
            self.documents
                .drop_collection(collection_name)
                .map_err(Into::into),
        )?;

        self.metrics.increment_schemas_deleted();
        log_event_with_fields(Event::SchemaDeleted, &[("collection", collection_name)]);
        Ok(true)
    }

    pub fn schema_exists(&self, collection_name: &str) -> ServiceResult<bool> {
        observe("schema_exists", self.registry.exists(collection_name).map_err(Into::into))
    }

    // ==================
    // Documents
    // ==================

    /// Validate a payload, fill defaults and store it.
    ///
    /// Validation runs on the payload as given, before defaults are applied.
    ///
    /// # Errors
    ///
    /// - `SchemaNotFound` if the collection has no schema
    /// - `ValidationFailed` with every violation; nothing is stored
    pub fn create_document(
        &self,
        collection_name: &str,
        payload: DocumentData,
    ) -> ServiceResult<DynamicDocument> {
        let schema = self.require_schema(collection_name)?;
        self.check(collection_name, &payload, &schema)?;

        let mut data = payload;
        apply_defaults(&mut data, &schema.fields);

        let document = observe(
            "create_document",
            self.documents
                .insert(collection_name, data)
                .map_err(Into::into),
        )?;

        self.metrics.increment_documents_created();
        log_event_with_fields(
            Event::DocumentCreated,
            &[("collection", collection_name), ("id", document.id.as_str())],
        );
        Ok(document)
    }

    /// Absent collections and ids both read as `None`
    pub fn get_document(
        &self,
        collection_name: &str,
        id: &str,
    ) -> ServiceResult<Option<DynamicDocument>> {
        observe(
            "get_document",
            self.documents
                .find_by_id(collection_name, id)
                .map_err(Into::into),
        )
    }

    pub fn list_documents(&self, collection_name: &str) -> ServiceResult<Vec<DynamicDocument>> {
        observe(
            "list_documents",
            self.documents.find_all(collection_name).map_err(Into::into),
        )
    }

    /// Documents matching every predicate of the filter
    pub fn find_documents(
        &self,
        collection_name: &str,
        filter: &FieldFilter,
    ) -> ServiceResult<Vec<DynamicDocument>> {
        observe(
            "find_documents",
            self.documents
                .find_where(collection_name, filter)
                .map_err(Into::into),
        )
    }

    /// Merge `updates` into a stored document and revalidate the result.
    ///
    /// Defaults are not re-applied. A rejected update leaves the stored
    /// document untouched.
    ///
    /// # Errors
    ///
    /// - `SchemaNotFound` if the collection has no schema
    /// - `DocumentNotFound` if the id is unknown
    /// - `ValidationFailed` if the merged data breaks the schema
    pub fn update_document(
        &self,
        collection_name: &str,
        id: &str,
        updates: DocumentData,
    ) -> ServiceResult<DynamicDocument> {
        let schema = self.require_schema(collection_name)?;
        let existing = self
            .get_document(collection_name, id)?
            .ok_or_else(|| ServiceError::DocumentNotFound(id.to_string()))?;

        let merged = merge_for_update(&existing.data, &updates);
        self.check(collection_name, &merged, &schema)?;

        let affected = observe(
            "update_document",
            self.documents
                .update_fields(collection_name, id, DocumentUpdate::now(merged))
                .map_err(Into::into),
        )?;
        // Deleted between the read and the write
        if affected == 0 {
            return Err(ServiceError::DocumentNotFound(id.to_string()));
        }

        let document = self
            .get_document(collection_name, id)?
            .ok_or_else(|| ServiceError::DocumentNotFound(id.to_string()))?;

        self.metrics.increment_documents_updated();
        let field_count = updates.len().to_string();
        log_event_with_fields(
            Event::DocumentUpdated,
            &[
                ("collection", collection_name),
                ("fields", field_count.as_str()),
                ("id", id),
            ],
        );
        Ok(document)
    }

    /// Returns whether a document was removed
    pub fn delete_document(&self, collection_name: &str, id: &str) -> ServiceResult<bool> {
        let removed = observe(
            "delete_document",
            self.documents
                .delete_by_id(collection_name, id)
                .map_err(Into::into),
        )?;
        if removed == 0 {
            return Ok(false);
        }

        self.metrics.increment_documents_deleted();
        log_event_with_fields(
            Event::DocumentDeleted,
            &[("collection", collection_name), ("id", id)],
        );
        Ok(true)
    }

    fn require_schema(&self, collection_name: &str) -> ServiceResult<CollectionSchema> {
        self.get_schema(collection_name)?
            .ok_or_else(|| ServiceError::SchemaNotFound(collection_name.to_string()))
    }

    fn check(
        &self,
        collection_name: &str,
        data: &DocumentData,
        schema: &CollectionSchema,
    ) -> ServiceResult<()> {
        let violations = validate(data, schema);
        if violations.is_empty() {
            return Ok(());
        }

        self.metrics.increment_writes_rejected();
        let joined = join_violations(&violations);
        log_event_with_fields(
            Event::WriteRejected,
            &[
                ("collection", collection_name),
                ("violations", joined.as_str()),
            ],
        );
        Err(ServiceError::ValidationFailed(violations))
    }
}

/// Logs store failures on their way out
fn observe<T>(operation: &str, result: ServiceResult<T>) -> ServiceResult<T> {
    result.map_err(|err| {
        if let ServiceError::StoreUnavailable(reason) = &err {
            log_event_with_fields(
                Event::StoreFailure,
                &[("operation", operation), ("reason", reason.as_str())],
            );
        }
        err
    })
}
