//! Document Lifecycle Tests
//!
//! End-to-end behavior of `CollectionService`:
//! - create validates the raw payload, then fills defaults
//! - update merges, revalidates, and leaves data untouched on rejection
//! - schema names are unique
//! - deleting an unknown schema drops nothing

use std::sync::{Arc, Mutex};

use flexdb::document::{DocumentData, DocumentUpdate, DynamicDocument, FieldFilter};
use flexdb::schema::{CollectionSchema, Constraint, FieldDefinition, FieldType, SchemaRegistry};
use flexdb::service::{CollectionService, ServiceError};
use flexdb::store::{DocumentStore, MemDocumentStore, MemSchemaStore, StoreError, StoreResult};
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn data(value: Value) -> DocumentData {
    value.as_object().cloned().unwrap()
}

fn products_schema() -> CollectionSchema {
    CollectionSchema::new(
        "products",
        vec![
            FieldDefinition::new("name", FieldType::String).required(),
            FieldDefinition::new("price", FieldType::Double)
                .required()
                .with_constraint(Constraint::Min(0.0)),
            FieldDefinition::new("category", FieldType::String).with_default("general"),
        ],
    )
}

fn setup_products() -> CollectionService {
    let service = CollectionService::in_memory();
    service.create_schema(products_schema()).unwrap();
    service
}

fn violation_messages(err: &ServiceError) -> Vec<String> {
    err.violations().iter().map(ToString::to_string).collect()
}

/// Document store that records dropped collections and can be made to fail
#[derive(Debug, Default)]
struct SpyDocumentStore {
    inner: MemDocumentStore,
    dropped: Mutex<Vec<String>>,
    fail_writes: bool,
}

impl SpyDocumentStore {
    fn dropped(&self) -> Vec<String> {
        self.dropped.lock().unwrap().clone()
    }

    fn write_guard(&self) -> StoreResult<()> {
        if self.fail_writes {
            return Err(StoreError::Unavailable("connection refused".into()));
        }
        Ok(())
    }
}

impl DocumentStore for SpyDocumentStore {
    fn insert(&self, collection: &str, data: DocumentData) -> StoreResult<DynamicDocument> {
        self.write_guard()?;
        self.inner.insert(collection, data)
    }

    fn find_by_id(&self, collection: &str, id: &str) -> StoreResult<Option<DynamicDocument>> {
        self.inner.find_by_id(collection, id)
    }

    fn find_all(&self, collection: &str) -> StoreResult<Vec<DynamicDocument>> {
        self.inner.find_all(collection)
    }

    fn find_where(
        &self,
        collection: &str,
        filter: &FieldFilter,
    ) -> StoreResult<Vec<DynamicDocument>> {
        self.inner.find_where(collection, filter)
    }

    fn update_fields(
        &self,
        collection: &str,
        id: &str,
        update: DocumentUpdate,
    ) -> StoreResult<u64> {
        self.write_guard()?;
        self.inner.update_fields(collection, id, update)
    }

    fn delete_by_id(&self, collection: &str, id: &str) -> StoreResult<u64> {
        self.write_guard()?;
        self.inner.delete_by_id(collection, id)
    }

    fn drop_collection(&self, collection: &str) -> StoreResult<()> {
        self.dropped.lock().unwrap().push(collection.to_string());
        self.inner.drop_collection(collection)
    }
}

fn spy_service(spy: Arc<SpyDocumentStore>) -> CollectionService {
    CollectionService::new(SchemaRegistry::new(Arc::new(MemSchemaStore::new())), spy)
}

// =============================================================================
// Create
// =============================================================================

#[test]
fn test_create_rejects_negative_price() {
    let service = setup_products();

    let err = service
        .create_document("products", data(json!({"name": "Laptop", "price": -5})))
        .unwrap_err();

    assert!(matches!(err, ServiceError::ValidationFailed(_)));
    assert_eq!(
        violation_messages(&err),
        vec!["Field 'price' must be at least 0.0"]
    );
    assert!(service.list_documents("products").unwrap().is_empty());
}

#[test]
fn test_create_fills_default_category() {
    let service = setup_products();

    let doc = service
        .create_document("products", data(json!({"name": "Laptop", "price": 999.99})))
        .unwrap();

    assert_eq!(doc.collection_name, "products");
    assert_eq!(doc.get("category"), Some(&json!("general")));
    assert_eq!(doc.created_at, doc.updated_at);
    assert_eq!(
        service.get_document("products", &doc.id).unwrap(),
        Some(doc)
    );
}

#[test]
fn test_create_missing_required_field() {
    let service = setup_products();

    let err = service
        .create_document("products", data(json!({"price": 1})))
        .unwrap_err();

    assert!(violation_messages(&err).contains(&"Field 'name' is required".to_string()));
}

#[test]
fn test_create_against_unknown_collection() {
    let service = CollectionService::in_memory();

    let err = service
        .create_document("ghost", data(json!({"a": 1})))
        .unwrap_err();
    assert!(matches!(err, ServiceError::SchemaNotFound(ref n) if n == "ghost"));
}

// =============================================================================
// Update
// =============================================================================

#[test]
fn test_update_with_bad_type_leaves_document_unchanged() {
    let service = setup_products();
    let original = service
        .create_document("products", data(json!({"name": "Laptop", "price": 999.99})))
        .unwrap();

    let err = service
        .update_document(
            "products",
            &original.id,
            data(json!({"price": "not-a-number"})),
        )
        .unwrap_err();

    assert_eq!(violation_messages(&err), vec!["Field 'price' must be a number"]);
    assert_eq!(
        service.get_document("products", &original.id).unwrap(),
        Some(original)
    );
}

#[test]
fn test_update_merges_partial_data() {
    let service = setup_products();
    let original = service
        .create_document("products", data(json!({"name": "Laptop", "price": 999.99})))
        .unwrap();

    let updated = service
        .update_document("products", &original.id, data(json!({"price": 899, "color": "grey"})))
        .unwrap();

    assert_eq!(
        updated.data,
        data(json!({"name": "Laptop", "price": 899, "category": "general", "color": "grey"}))
    );
    assert_eq!(updated.id, original.id);
    assert!(updated.updated_at >= original.updated_at);
}

#[test]
fn test_update_revalidates_against_current_schema() {
    let service = setup_products();
    let doc = service
        .create_document("products", data(json!({"name": "Laptop", "price": 1})))
        .unwrap();

    service
        .update_schema(
            "products",
            vec![FieldDefinition::new("sku", FieldType::String).required()],
        )
        .unwrap();

    let err = service
        .update_document("products", &doc.id, data(json!({"price": 2})))
        .unwrap_err();
    assert_eq!(violation_messages(&err), vec!["Field 'sku' is required"]);
}

#[test]
fn test_update_unknown_schema_and_document() {
    let service = setup_products();

    assert!(matches!(
        service.update_document("ghost", "1", DocumentData::new()),
        Err(ServiceError::SchemaNotFound(_))
    ));
    assert!(matches!(
        service.update_document("products", "1", DocumentData::new()),
        Err(ServiceError::DocumentNotFound(_))
    ));
}

// =============================================================================
// Read & Delete
// =============================================================================

#[test]
fn test_find_documents_ands_predicates() {
    let service = setup_products();
    for (name, price, category) in [("Pen", 1, "office"), ("Desk", 150, "office"), ("Mug", 1, "kitchen")] {
        service
            .create_document(
                "products",
                data(json!({"name": name, "price": price, "category": category})),
            )
            .unwrap();
    }

    let filter = FieldFilter::new().eq("category", "office").eq("price", 1);
    let found = service.find_documents("products", &filter).unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].get("name"), Some(&json!("Pen")));
}

#[test]
fn test_find_documents_by_nested_path_and_array_member() {
    let service = setup_products();
    service
        .create_document(
            "products",
            data(json!({"name": "Lamp", "price": 40, "specs": {"color": "red"}, "tags": ["desk", "led"]})),
        )
        .unwrap();
    service
        .create_document(
            "products",
            data(json!({"name": "Rug", "price": 90, "specs": {"color": "blue"}, "tags": ["floor"]})),
        )
        .unwrap();

    let by_color = FieldFilter::new().eq("specs.color", "red");
    let found = service.find_documents("products", &by_color).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].get("name"), Some(&json!("Lamp")));

    let by_tag = FieldFilter::new().eq("tags", "floor");
    let found = service.find_documents("products", &by_tag).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].get("name"), Some(&json!("Rug")));
}

#[test]
fn test_delete_document_is_idempotent() {
    let service = setup_products();
    let doc = service
        .create_document("products", data(json!({"name": "Pen", "price": 1})))
        .unwrap();

    assert!(service.delete_document("products", &doc.id).unwrap());
    assert!(!service.delete_document("products", &doc.id).unwrap());
    assert_eq!(service.get_document("products", &doc.id).unwrap(), None);
}

// =============================================================================
// Schema lifecycle
// =============================================================================

#[test]
fn test_duplicate_schema_is_rejected() {
    let service = setup_products();

    let err = service.create_schema(products_schema()).unwrap_err();
    assert!(matches!(err, ServiceError::DuplicateSchema(ref n) if n == "products"));
    assert_eq!(err.code(), "FLEX_DUPLICATE_SCHEMA");

    let schemas = service.list_schemas().unwrap();
    assert_eq!(schemas.len(), 1);
}

#[test]
fn test_concurrent_creates_yield_one_schema() {
    let service = CollectionService::in_memory();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = service.clone();
            std::thread::spawn(move || service.create_schema(products_schema()).is_ok())
        })
        .collect();
    let successes = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();

    assert_eq!(successes, 1);
    assert_eq!(service.list_schemas().unwrap().len(), 1);
}

#[test]
fn test_delete_unknown_schema_drops_nothing() {
    let spy = Arc::new(SpyDocumentStore::default());
    let service = spy_service(spy.clone());
    service.create_schema(products_schema()).unwrap();

    assert!(!service.delete_schema("ghost").unwrap());
    assert!(spy.dropped().is_empty());
    assert!(service.schema_exists("products").unwrap());
}

#[test]
fn test_delete_schema_drops_its_collection() {
    let spy = Arc::new(SpyDocumentStore::default());
    let service = spy_service(spy.clone());
    service.create_schema(products_schema()).unwrap();
    service
        .create_document("products", data(json!({"name": "Pen", "price": 1})))
        .unwrap();

    assert!(service.delete_schema("products").unwrap());
    assert_eq!(spy.dropped(), vec!["products".to_string()]);
    assert!(!service.schema_exists("products").unwrap());
    assert!(service.list_documents("products").unwrap().is_empty());
}

#[test]
fn test_store_failure_propagates_as_retryable() {
    let spy = Arc::new(SpyDocumentStore {
        fail_writes: true,
        ..SpyDocumentStore::default()
    });
    let service = spy_service(spy);
    service.create_schema(products_schema()).unwrap();

    let err = service
        .create_document("products", data(json!({"name": "Pen", "price": 1})))
        .unwrap_err();

    assert!(matches!(err, ServiceError::StoreUnavailable(_)));
    assert!(err.is_retryable());
}
