use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use super::{Document, DocumentStore, IndexSpec, ID_FIELD};
use crate::error::StoreError;

type Collection = DashMap<String, Document>;

/// In-process store with the same index semantics as the MongoDB store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<DashMap<String, Arc<Collection>>>,
    indexes: Arc<DashMap<String, Vec<(String, IndexSpec)>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn collection(&self, name: &str) -> Arc<Collection> {
        self.collections
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(DashMap::new()))
            .clone()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let Some(documents) = self.collections.get(collection).map(|c| Arc::clone(c.value())) else {
            return Ok(None);
        };
        let document = documents.get(id).map(|entry| entry.value().clone());
        Ok(document)
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let Some(documents) = self.collections.get(collection).map(|c| Arc::clone(c.value())) else {
            return Ok(Vec::new());
        };

        let mut entries: Vec<(String, Document)> = documents
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(entries.into_iter().map(|(_, document)| document).collect())
    }

    async fn put(&self, collection: &str, id: &str, mut document: Document) -> Result<(), StoreError> {
        document.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
        self.collection(collection).insert(id.to_string(), document);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let removed = self
            .collections
            .get(collection)
            .map(|c| Arc::clone(c.value()))
            .and_then(|documents| documents.remove(id))
            .is_some();
        Ok(removed)
    }

    async fn create_index(&self, collection: &str, index: &IndexSpec) -> Result<String, StoreError> {
        let name = index.name();
        let mut indexes = self.indexes.entry(collection.to_string()).or_default();

        let existing = indexes
            .iter()
            .find(|(existing, _)| *existing == name)
            .map(|(_, spec)| spec.clone());

        match existing {
            Some(spec) if spec == *index => {}
            Some(_) => return Err(StoreError::IndexConflict { name }),
            None => indexes.push((name.clone(), index.clone())),
        }

        Ok(name)
    }

    async fn drop_index(&self, collection: &str, name: &str) -> Result<(), StoreError> {
        if let Some(mut indexes) = self.indexes.get_mut(collection) {
            indexes.retain(|(existing, _)| existing != name);
        }
        Ok(())
    }

    async fn index_names(&self, collection: &str) -> Result<Vec<String>, StoreError> {
        let names = self
            .indexes
            .get(collection)
            .map(|indexes| indexes.iter().map(|(name, _)| name.clone()).collect())
            .unwrap_or_default();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::store::SortOrder;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[tokio::test]
    async fn put_then_get_sets_the_id() {
        let store = MemoryStore::new();
        store.put("global", "public", doc(json!({ "counter": 3 }))).await.unwrap();

        let found = store.get("global", "public").await.unwrap().unwrap();
        assert_eq!(found["counter"], json!(3));
        assert_eq!(found["_id"], json!("public"));
        assert!(store.get("global", "private").await.unwrap().is_none());
        assert!(store.get("nowhere", "public").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_is_ordered_by_id() {
        let store = MemoryStore::new();
        for id in ["t3", "t1", "t2"] {
            store.put("tests", id, Document::new()).await.unwrap();
        }

        let ids: Vec<_> = store
            .list("tests")
            .await
            .unwrap()
            .iter()
            .filter_map(crate::store::document_id)
            .collect();
        assert_eq!(ids, ["t1", "t2", "t3"]);
    }

    #[tokio::test]
    async fn delete_reports_whether_something_was_removed() {
        let store = MemoryStore::new();
        store.put("changelog", "m1", Document::new()).await.unwrap();

        assert!(store.delete("changelog", "m1").await.unwrap());
        assert!(!store.delete("changelog", "m1").await.unwrap());
    }

    #[tokio::test]
    async fn creating_the_same_index_twice_keeps_one() {
        let store = MemoryStore::new();
        let index = IndexSpec::descending("timestamp");

        store.create_index("logs", &index).await.unwrap();
        store.create_index("logs", &index).await.unwrap();

        assert_eq!(store.index_names("logs").await.unwrap(), ["timestamp_-1"]);
    }

    #[tokio::test]
    async fn conflicting_definition_under_one_name_is_rejected() {
        let store = MemoryStore::new();
        store
            .indexes
            .insert("logs".into(), vec![("timestamp_-1".into(), IndexSpec::ascending("timestamp"))]);

        let err = store
            .create_index("logs", &IndexSpec { field: "timestamp".into(), order: SortOrder::Descending })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::IndexConflict { name } if name == "timestamp_-1"));
    }

    #[tokio::test]
    async fn dropping_a_missing_index_succeeds() {
        let store = MemoryStore::new();
        store.drop_index("logs", "timestamp_-1").await.unwrap();
        assert!(store.index_names("logs").await.unwrap().is_empty());
    }
}
