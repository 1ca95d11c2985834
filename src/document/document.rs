//! # Dynamic Document

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Flat mapping from field name to arbitrary value
pub type DocumentData = Map<String, Value>;

/// One stored record of a collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicDocument {
    /// Identifier assigned by the store
    pub id: String,

    /// Field values
    pub data: DocumentData,

    /// Owning collection
    pub collection_name: String,

    /// Created timestamp
    pub created_at: DateTime<Utc>,

    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl DynamicDocument {
    /// Get a field value
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }
}

/// Replacement data for an existing document
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentUpdate {
    pub data: DocumentData,
    pub updated_at: DateTime<Utc>,
}

impl DocumentUpdate {
    /// Update stamped with the current time
    pub fn now(data: DocumentData) -> Self {
        Self {
            data,
            updated_at: Utc::now(),
        }
    }
}
