//! # JSON File Stores
//!
//! Layout under the data directory:
//! - `schemas.json`: array of all schemas
//! - `collections/<name>.json`: array of one collection's documents
//!
//! Every write rewrites the whole file through a temporary file and a
//! rename. Read-modify-write cycles are serialized by a per-store mutex, so
//! one process may share a store across threads; separate processes must
//! not write the same data directory concurrently.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use super::errors::{StoreError, StoreResult};
use super::{DocumentStore, SchemaStore};
use crate::document::{DocumentData, DocumentUpdate, DynamicDocument, FieldFilter};
use crate::schema::CollectionSchema;

const SCHEMAS_FILE: &str = "schemas.json";
const COLLECTIONS_DIR: &str = "collections";

fn load_array<T: DeserializeOwned>(path: &Path) -> StoreResult<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        StoreError::Unavailable(format!("Failed to read {}: {}", path.display(), e))
    })?;

    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&content).map_err(|e| {
        StoreError::Unavailable(format!("Failed to parse {}: {}", path.display(), e))
    })
}

fn save_array<T: Serialize>(path: &Path, items: &[T]) -> StoreResult<()> {
    let content = serde_json::to_string_pretty(items)
        .map_err(|e| StoreError::Unavailable(format!("Failed to serialize: {}", e)))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            StoreError::Unavailable(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, content).map_err(|e| {
        StoreError::Unavailable(format!("Failed to write {}: {}", tmp.display(), e))
    })?;
    fs::rename(&tmp, path).map_err(|e| {
        StoreError::Unavailable(format!("Failed to replace {}: {}", path.display(), e))
    })
}

fn lock(mutex: &Mutex<()>) -> StoreResult<MutexGuard<'_, ()>> {
    mutex
        .lock()
        .map_err(|_| StoreError::Unavailable("Lock poisoned".into()))
}

/// Maps a collection name to a safe file stem.
///
/// ASCII alphanumerics, `-` and `_` are kept; every other byte becomes `%XX`.
fn file_stem(collection: &str) -> String {
    let mut stem = String::with_capacity(collection.len());
    for byte in collection.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            stem.push(byte as char);
        } else {
            stem.push_str(&format!("%{:02X}", byte));
        }
    }
    if stem.is_empty() {
        stem.push('%');
    }
    stem
}

/// Schema store backed by `<data_dir>/schemas.json`
#[derive(Debug)]
pub struct FileSchemaStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileSchemaStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(SCHEMAS_FILE),
            guard: Mutex::new(()),
        }
    }

    /// Path of the schema file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> StoreResult<Vec<CollectionSchema>> {
        load_array(&self.path)
    }
}

impl SchemaStore for FileSchemaStore {
    fn insert_unique(&self, schema: CollectionSchema) -> StoreResult<CollectionSchema> {
        let _guard = lock(&self.guard)?;
        let mut schemas = self.load()?;

        if schemas
            .iter()
            .any(|s| s.collection_name == schema.collection_name)
        {
            return Err(StoreError::DuplicateKey(schema.collection_name));
        }

        schemas.push(schema.clone());
        save_array(&self.path, &schemas)?;
        Ok(schema)
    }

    fn find_by_name(&self, name: &str) -> StoreResult<Option<CollectionSchema>> {
        let _guard = lock(&self.guard)?;
        Ok(self
            .load()?
            .into_iter()
            .find(|s| s.collection_name == name))
    }

    fn save(&self, schema: CollectionSchema) -> StoreResult<CollectionSchema> {
        let _guard = lock(&self.guard)?;
        let mut schemas = self.load()?;

        // Update or insert
        match schemas
            .iter()
            .position(|s| s.collection_name == schema.collection_name)
        {
            Some(idx) => schemas[idx] = schema.clone(),
            None => schemas.push(schema.clone()),
        }

        save_array(&self.path, &schemas)?;
        Ok(schema)
    }

    fn delete_by_name(&self, name: &str) -> StoreResult<()> {
        let _guard = lock(&self.guard)?;
        let mut schemas = self.load()?;

        let before = schemas.len();
        schemas.retain(|s| s.collection_name != name);
        if schemas.len() != before {
            save_array(&self.path, &schemas)?;
        }
        Ok(())
    }

    fn list_all(&self) -> StoreResult<Vec<CollectionSchema>> {
        let _guard = lock(&self.guard)?;
        self.load()
    }
}

/// Document store backed by one JSON file per collection
#[derive(Debug)]
pub struct FileDocumentStore {
    dir: PathBuf,
    guard: Mutex<()>,
}

impl FileDocumentStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            dir: data_dir.as_ref().join(COLLECTIONS_DIR),
            guard: Mutex::new(()),
        }
    }

    /// Path of the file holding a collection
    pub fn collection_path(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{}.json", file_stem(collection)))
    }

    fn load(&self, collection: &str) -> StoreResult<Vec<DynamicDocument>> {
        load_array(&self.collection_path(collection))
    }

    fn save(&self, collection: &str, documents: &[DynamicDocument]) -> StoreResult<()> {
        save_array(&self.collection_path(collection), documents)
    }
}

impl DocumentStore for FileDocumentStore {
    fn insert(&self, collection: &str, data: DocumentData) -> StoreResult<DynamicDocument> {
        let _guard = lock(&self.guard)?;
        let mut documents = self.load(collection)?;

        let now = Utc::now();
        let document = DynamicDocument {
            id: Uuid::new_v4().to_string(),
            data,
            collection_name: collection.to_string(),
            created_at: now,
            updated_at: now,
        };

        documents.push(document.clone());
        self.save(collection, &documents)?;
        Ok(document)
    }

    fn find_by_id(&self, collection: &str, id: &str) -> StoreResult<Option<DynamicDocument>> {
        let _guard = lock(&self.guard)?;
        Ok(self.load(collection)?.into_iter().find(|d| d.id == id))
    }

    fn find_all(&self, collection: &str) -> StoreResult<Vec<DynamicDocument>> {
        let _guard = lock(&self.guard)?;
        self.load(collection)
    }

    fn find_where(
        &self,
        collection: &str,
        filter: &FieldFilter,
    ) -> StoreResult<Vec<DynamicDocument>> {
        let _guard = lock(&self.guard)?;
        Ok(self
            .load(collection)?
            .into_iter()
            .filter(|d| filter.matches(&d.data))
            .collect())
    }

    fn update_fields(
        &self,
        collection: &str,
        id: &str,
        update: DocumentUpdate,
    ) -> StoreResult<u64> {
        let _guard = lock(&self.guard)?;
        let mut documents = self.load(collection)?;

        let Some(document) = documents.iter_mut().find(|d| d.id == id) else {
            return Ok(0);
        };
        document.data = update.data;
        document.updated_at = update.updated_at;

        self.save(collection, &documents)?;
        Ok(1)
    }

    fn delete_by_id(&self, collection: &str, id: &str) -> StoreResult<u64> {
        let _guard = lock(&self.guard)?;
        let mut documents = self.load(collection)?;

        let before = documents.len();
        documents.retain(|d| d.id != id);
        let removed = (before - documents.len()) as u64;

        if removed > 0 {
            self.save(collection, &documents)?;
        }
        Ok(removed)
    }

    fn drop_collection(&self, collection: &str) -> StoreResult<()> {
        let _guard = lock(&self.guard)?;
        let path = self.collection_path(collection);
        if !path.exists() {
            return Ok(());
        }
        fs::remove_file(&path).map_err(|e| {
            StoreError::Unavailable(format!("Failed to remove {}: {}", path.display(), e))
        })
    }
}
