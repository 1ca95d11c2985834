//! # In-Memory Stores
//!
//! Process-local stores for tests and embedded use. Nothing survives a
//! restart.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use uuid::Uuid;

use super::errors::{StoreError, StoreResult};
use super::{DocumentStore, SchemaStore};
use crate::document::{DocumentData, DocumentUpdate, DynamicDocument, FieldFilter};
use crate::schema::CollectionSchema;

fn read<T>(lock: &RwLock<T>) -> StoreResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|_| StoreError::Unavailable("Lock poisoned".into()))
}

fn write<T>(lock: &RwLock<T>) -> StoreResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|_| StoreError::Unavailable("Lock poisoned".into()))
}

/// In-memory schema store
#[derive(Debug, Default)]
pub struct MemSchemaStore {
    schemas: RwLock<HashMap<String, CollectionSchema>>,
}

impl MemSchemaStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SchemaStore for MemSchemaStore {
    fn insert_unique(&self, schema: CollectionSchema) -> StoreResult<CollectionSchema> {
        // Check and insert under one write lock
        let mut schemas = write(&self.schemas)?;
        if schemas.contains_key(&schema.collection_name) {
            return Err(StoreError::DuplicateKey(schema.collection_name));
        }
        schemas.insert(schema.collection_name.clone(), schema.clone());
        Ok(schema)
    }

    fn find_by_name(&self, name: &str) -> StoreResult<Option<CollectionSchema>> {
        Ok(read(&self.schemas)?.get(name).cloned())
    }

    fn save(&self, schema: CollectionSchema) -> StoreResult<CollectionSchema> {
        write(&self.schemas)?.insert(schema.collection_name.clone(), schema.clone());
        Ok(schema)
    }

    fn delete_by_name(&self, name: &str) -> StoreResult<()> {
        write(&self.schemas)?.remove(name);
        Ok(())
    }

    fn list_all(&self) -> StoreResult<Vec<CollectionSchema>> {
        Ok(read(&self.schemas)?.values().cloned().collect())
    }
}

/// In-memory document store. Documents keep insertion order per collection.
#[derive(Debug, Default)]
pub struct MemDocumentStore {
    collections: RwLock<HashMap<String, Vec<DynamicDocument>>>,
}

impl MemDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn count(&self, collection: &str) -> StoreResult<usize> {
        Ok(read(&self.collections)?
            .get(collection)
            .map_or(0, Vec::len))
    }
}

impl DocumentStore for MemDocumentStore {
    fn insert(&self, collection: &str, data: DocumentData) -> StoreResult<DynamicDocument> {
        let now = Utc::now();
        let document = DynamicDocument {
            id: Uuid::new_v4().to_string(),
            data,
            collection_name: collection.to_string(),
            created_at: now,
            updated_at: now,
        };

        write(&self.collections)?
            .entry(collection.to_string())
            .or_default()
            .push(document.clone());

        Ok(document)
    }

    fn find_by_id(&self, collection: &str, id: &str) -> StoreResult<Option<DynamicDocument>> {
        Ok(read(&self.collections)?
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned())
    }

    fn find_all(&self, collection: &str) -> StoreResult<Vec<DynamicDocument>> {
        Ok(read(&self.collections)?
            .get(collection)
            .cloned()
            .unwrap_or_default())
    }

    fn find_where(
        &self,
        collection: &str,
        filter: &FieldFilter,
    ) -> StoreResult<Vec<DynamicDocument>> {
        Ok(read(&self.collections)?
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| filter.matches(&d.data))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn update_fields(
        &self,
        collection: &str,
        id: &str,
        update: DocumentUpdate,
    ) -> StoreResult<u64> {
        let mut collections = write(&self.collections)?;
        let Some(document) = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
        else {
            return Ok(0);
        };

        document.data = update.data;
        document.updated_at = update.updated_at;
        Ok(1)
    }

    fn delete_by_id(&self, collection: &str, id: &str) -> StoreResult<u64> {
        let mut collections = write(&self.collections)?;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(0);
        };

        let before = docs.len();
        docs.retain(|d| d.id != id);
        Ok((before - docs.len()) as u64)
    }

    fn drop_collection(&self, collection: &str) -> StoreResult<()> {
        write(&self.collections)?.remove(collection);
        Ok(())
    }
}
