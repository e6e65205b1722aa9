//! Collection/document engine.
//!
//! Documents are JSON objects keyed by a store-assigned 24-hex id. The id
//! is also materialized as an `id` field inside the document so records
//! deserialize straight into model types.

use std::collections::HashMap;

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use jobster_models::id;

use crate::error::StoreResult;

/// A stored document: a JSON object including its `id` field.
pub type Document = serde_json::Map<String, Value>;

#[derive(Default)]
struct Collection {
    docs: HashMap<String, Document>,
    // Insertion order of live ids; find_all returns documents in this order.
    order: Vec<String>,
}

impl Collection {
    fn insert(&mut self, fields: Document) -> Document {
        let id = id::generate();
        let mut doc = fields;
        doc.insert("id".to_string(), Value::String(id.clone()));
        self.order.push(id.clone());
        self.docs.insert(id, doc.clone());
        doc
    }

    fn remove(&mut self, id: &str) -> bool {
        if self.docs.remove(id).is_some() {
            self.order.retain(|x| x != id);
            true
        } else {
            false
        }
    }
}

/// Process-local document store.
///
/// A single writer lock serializes conflicting writes; last write wins for
/// concurrent updates to the same id.
#[derive(Default)]
pub struct DocumentStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl DocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document, assigning it a fresh id. Returns the stored
    /// document including the `id` field.
    pub async fn insert(&self, collection: &str, fields: Document) -> StoreResult<Document> {
        let mut collections = self.collections.write().await;
        let coll = collections.entry(collection.to_string()).or_default();
        let doc = coll.insert(fields);
        debug!(collection, id = %doc["id"], "inserted document");
        Ok(doc)
    }

    /// Insert several documents in one write-lock acquisition.
    pub async fn insert_many(
        &self,
        collection: &str,
        batch: Vec<Document>,
    ) -> StoreResult<Vec<Document>> {
        let mut collections = self.collections.write().await;
        let coll = collections.entry(collection.to_string()).or_default();
        let docs = batch.into_iter().map(|fields| coll.insert(fields)).collect();
        debug!(collection, "inserted document batch");
        Ok(docs)
    }

    /// All documents in a collection, in insertion order.
    pub async fn find_all(&self, collection: &str) -> StoreResult<Vec<Document>> {
        let collections = self.collections.read().await;
        let docs = match collections.get(collection) {
            Some(coll) => coll
                .order
                .iter()
                .filter_map(|id| coll.docs.get(id).cloned())
                .collect(),
            None => Vec::new(),
        };
        Ok(docs)
    }

    /// A document by id, if present.
    pub async fn find_by_id(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|coll| coll.docs.get(id).cloned()))
    }

    /// The first document whose top-level `field` equals `value`.
    pub async fn find_one(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> StoreResult<Option<Document>> {
        let collections = self.collections.read().await;
        let found = collections.get(collection).and_then(|coll| {
            coll.order
                .iter()
                .filter_map(|id| coll.docs.get(id))
                .find(|doc| doc.get(field) == Some(value))
                .cloned()
        });
        Ok(found)
    }

    /// Shallow-merge `fields` onto the document with the given id.
    ///
    /// Supplied top-level fields overwrite stored ones; omitted fields keep
    /// their prior values. The `id` field is immutable and cannot be
    /// overwritten. Returns the updated document, or `None` when no record
    /// matches.
    pub async fn update_by_id(
        &self,
        collection: &str,
        id: &str,
        fields: Document,
    ) -> StoreResult<Option<Document>> {
        let mut collections = self.collections.write().await;
        let Some(coll) = collections.get_mut(collection) else {
            return Ok(None);
        };
        let Some(doc) = coll.docs.get_mut(id) else {
            return Ok(None);
        };
        for (key, value) in fields {
            if key == "id" {
                continue;
            }
            doc.insert(key, value);
        }
        debug!(collection, id, "updated document");
        Ok(Some(doc.clone()))
    }

    /// Physically delete a document. Returns whether a record was removed.
    pub async fn delete_by_id(&self, collection: &str, id: &str) -> StoreResult<bool> {
        let mut collections = self.collections.write().await;
        let removed = collections
            .get_mut(collection)
            .map(|coll| coll.remove(id))
            .unwrap_or(false);
        if removed {
            debug!(collection, id, "deleted document");
        }
        Ok(removed)
    }

    /// Delete every document in a collection. Returns the removed count.
    pub async fn delete_many(&self, collection: &str) -> StoreResult<usize> {
        let mut collections = self.collections.write().await;
        let count = match collections.get_mut(collection) {
            Some(coll) => {
                let n = coll.docs.len();
                coll.docs.clear();
                coll.order.clear();
                n
            }
            None => 0,
        };
        debug!(collection, count, "cleared collection");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(pairs: &[(&str, &str)]) -> Document {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect()
    }

    #[tokio::test]
    async fn insert_assigns_valid_id() {
        let store = DocumentStore::new();
        let inserted = store.insert("jobs", doc(&[("title", "Web Developer")])).await.unwrap();
        let id = inserted["id"].as_str().unwrap();
        assert!(id::is_valid(id));
        assert_eq!(inserted["title"], "Web Developer");
    }

    #[tokio::test]
    async fn find_all_preserves_insertion_order() {
        let store = DocumentStore::new();
        store.insert("jobs", doc(&[("title", "first")])).await.unwrap();
        store.insert("jobs", doc(&[("title", "second")])).await.unwrap();
        store.insert("jobs", doc(&[("title", "third")])).await.unwrap();

        let all = store.find_all("jobs").await.unwrap();
        let titles: Vec<_> = all.iter().map(|d| d["title"].as_str().unwrap()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn find_one_matches_field() {
        let store = DocumentStore::new();
        store.insert("users", doc(&[("email", "a@example.com")])).await.unwrap();
        store.insert("users", doc(&[("email", "b@example.com")])).await.unwrap();

        let found = store
            .find_one("users", "email", &json!("b@example.com"))
            .await
            .unwrap()
            .expect("document");
        assert_eq!(found["email"], "b@example.com");

        let missing = store
            .find_one("users", "email", &json!("c@example.com"))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn update_merges_shallowly_and_keeps_id() {
        let store = DocumentStore::new();
        let inserted = store
            .insert("jobs", doc(&[("title", "old"), ("description", "keep me")]))
            .await
            .unwrap();
        let id = inserted["id"].as_str().unwrap().to_string();

        let mut patch = doc(&[("title", "new")]);
        patch.insert("id".to_string(), json!("ffffffffffffffffffffffff"));
        let updated = store
            .update_by_id("jobs", &id, patch)
            .await
            .unwrap()
            .expect("document");

        assert_eq!(updated["title"], "new");
        assert_eq!(updated["description"], "keep me");
        assert_eq!(updated["id"], json!(id));
    }

    #[tokio::test]
    async fn update_missing_returns_none() {
        let store = DocumentStore::new();
        let result = store
            .update_by_id("jobs", &id::generate(), doc(&[("title", "x")]))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_is_physical_and_reports_presence() {
        let store = DocumentStore::new();
        let inserted = store.insert("jobs", doc(&[("title", "gone")])).await.unwrap();
        let id = inserted["id"].as_str().unwrap().to_string();

        assert!(store.delete_by_id("jobs", &id).await.unwrap());
        assert!(store.find_by_id("jobs", &id).await.unwrap().is_none());
        // Repeating the delete is a no-op, not an error.
        assert!(!store.delete_by_id("jobs", &id).await.unwrap());
    }

    #[tokio::test]
    async fn delete_many_clears_collection() {
        let store = DocumentStore::new();
        store
            .insert_many("jobs", vec![doc(&[("t", "1")]), doc(&[("t", "2")])])
            .await
            .unwrap();
        assert_eq!(store.delete_many("jobs").await.unwrap(), 2);
        assert!(store.find_all("jobs").await.unwrap().is_empty());
    }
}
