//! Schema registry
//!
//! Holds one schema per collection name on top of a `SchemaStore`. The
//! registry is constructed once and handed to whoever needs it; it keeps no
//! state of its own beyond the store.
//!
//! Name uniqueness is enforced by the store's atomic `insert_unique`, so two
//! concurrent creates for one name cannot both succeed.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::errors::{SchemaError, SchemaResult};
use super::types::{CollectionSchema, FieldDefinition};
use crate::store::SchemaStore;

/// Registry of collection schemas.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    store: Arc<dyn SchemaStore>,
}

impl SchemaRegistry {
    /// Creates a registry backed by the given schema store.
    pub fn new(store: Arc<dyn SchemaStore>) -> Self {
        Self { store }
    }

    /// Registers a new schema, assigning identity and timestamps.
    ///
    /// # Errors
    ///
    /// `SchemaError::Duplicate` if a schema with the same collection name
    /// already exists.
    pub fn create(&self, mut schema: CollectionSchema) -> SchemaResult<CollectionSchema> {
        let now = Utc::now();
        schema.id = Some(Uuid::new_v4().to_string());
        schema.created_at = Some(now);
        schema.updated_at = Some(now);

        Ok(self.store.insert_unique(schema)?)
    }

    /// Returns the schema for a collection, if registered.
    pub fn get(&self, collection_name: &str) -> SchemaResult<Option<CollectionSchema>> {
        Ok(self.store.find_by_name(collection_name)?)
    }

    /// Returns whether a schema is registered under this name.
    pub fn exists(&self, collection_name: &str) -> SchemaResult<bool> {
        Ok(self.get(collection_name)?.is_some())
    }

    /// Replaces the field list of an existing schema.
    ///
    /// Name, identity and creation metadata are kept.
    ///
    /// # Errors
    ///
    /// `SchemaError::NotFound` if no schema exists for the name.
    pub fn update(
        &self,
        collection_name: &str,
        fields: Vec<FieldDefinition>,
    ) -> SchemaResult<CollectionSchema> {
        let mut schema = self
            .get(collection_name)?
            .ok_or_else(|| SchemaError::NotFound(collection_name.to_string()))?;

        schema.fields = fields;
        schema.updated_at = Some(Utc::now());

        Ok(self.store.save(schema)?)
    }

    /// Removes a schema. Returns `false`, without error, when the name was
    /// not registered.
    ///
    /// Dropping the collection's documents is the caller's job, and must
    /// only happen when this returns `true`.
    pub fn delete(&self, collection_name: &str) -> SchemaResult<bool> {
        if self.get(collection_name)?.is_none() {
            return Ok(false);
        }
        self.store.delete_by_name(collection_name)?;
        Ok(true)
    }

    /// Returns all registered schemas. Order is not significant.
    pub fn list_all(&self) -> SchemaResult<Vec<CollectionSchema>> {
        Ok(self.store.list_all()?)
    }
}
