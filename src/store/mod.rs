//! Document database access.
//!
//! Everything that talks to the database goes through [`DocumentStore`], so the
//! server and the migration runner work the same against MongoDB and against
//! the in-memory store used for local runs and tests.

mod memory;
mod mongo;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::StoreError;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

pub type Document = Map<String, Value>;

pub const ID_FIELD: &str = "_id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_i32(self) -> i32 {
        match self {
            SortOrder::Ascending => 1,
            SortOrder::Descending => -1,
        }
    }
}

/// Single-field index definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSpec {
    pub field: String,
    pub order: SortOrder,
}

impl IndexSpec {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Ascending,
        }
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Descending,
        }
    }

    /// Name the database assigns by default, e.g. `timestamp_-1`.
    pub fn name(&self) -> String {
        format!("{}_{}", self.field, self.order.as_i32())
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// All documents of a collection, ordered by id.
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Inserts or replaces the document with the given id.
    async fn put(&self, collection: &str, id: &str, document: Document) -> Result<(), StoreError>;

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError>;

    /// Creates the index, returning its name. Creating an identical index again is a no-op.
    async fn create_index(&self, collection: &str, index: &IndexSpec) -> Result<String, StoreError>;

    /// Drops the named index. Dropping an index that does not exist succeeds.
    async fn drop_index(&self, collection: &str, name: &str) -> Result<(), StoreError>;

    /// Names of the secondary indexes on a collection.
    async fn index_names(&self, collection: &str) -> Result<Vec<String>, StoreError>;
}

/// Reads the document id, accepting string, numeric and ObjectId ids.
pub fn document_id(document: &Document) -> Option<String> {
    match document.get(ID_FIELD)? {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        // ObjectIds come back from MongoDB as extended JSON
        Value::Object(id) => id.get("$oid")?.as_str().map(str::to_string),
        _ => None,
    }
}
