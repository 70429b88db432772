//! Process-local [`DocumentStore`].
//!
//! Keeps every collection in insertion order behind a `RwLock`. Nothing
//! survives a restart.

use std::{collections::BTreeMap, sync::RwLock};

use artisan_core::DocumentId;
use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};

use crate::document::{normalize_id, Filter, StoredDocument, ID_FIELD};
use crate::{DocumentStore, StoreError};

/// In-memory document store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    name: String,
    collections: RwLock<BTreeMap<String, Vec<Document>>>,
}

impl MemoryStore {
    /// Create an empty store reporting `name` as its database name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), collections: RwLock::default() }
    }

    /// Number of documents currently held in `collection`.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn len(&self, collection: &str) -> usize {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        self.collections
            .read()
            .expect("memory store read lock poisoned")
            .get(collection)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create_document(
        &self,
        collection: &str,
        document: &Document,
    ) -> Result<DocumentId, StoreError> {
        let mut stored = Document::new();
        let id = document
            .get(ID_FIELD)
            .cloned()
            .unwrap_or_else(|| ObjectId::new().into());
        stored.insert(ID_FIELD, id.clone());
        for (key, value) in document {
            if key != ID_FIELD {
                stored.insert(key.clone(), value.clone());
            }
        }

        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        self.collections
            .write()
            .expect("memory store write lock poisoned")
            .entry(collection.to_owned())
            .or_default()
            .push(stored);
        Ok(normalize_id(&id))
    }

    async fn get_documents(
        &self,
        collection: &str,
        filter: &Filter,
        limit: u32,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let collections = self.collections.read().expect("memory store read lock poisoned");
        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };
        docs.iter()
            .filter(|doc| filter.matches(doc))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .map(StoredDocument::from_raw)
            .collect()
    }

    async fn collection_names(&self) -> Result<Vec<String>, StoreError> {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let collections = self.collections.read().expect("memory store read lock poisoned");
        Ok(collections.keys().cloned().collect())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson::doc;

    use super::*;

    async fn seed(store: &MemoryStore) {
        for (name, craft, featured) in [
            ("A", "pottery", true),
            ("B", "weaving", false),
            ("C", "pottery", false),
        ] {
            let doc = doc! { "name": name, "craft_type": craft, "featured": featured };
            if let Err(e) = store.create_document("artisan", &doc).await {
                panic!("insert failed: {e}");
            }
        }
    }

    #[tokio::test]
    async fn memory_store_assigns_unique_object_ids() {
        let store = MemoryStore::new("test");
        let a = store.create_document("artisan", &doc! { "name": "A" }).await;
        let b = store.create_document("artisan", &doc! { "name": "A" }).await;
        match (a, b) {
            (Ok(a), Ok(b)) => {
                assert_ne!(a, b, "each insert must get a fresh id");
                assert_eq!(a.as_str().len(), 24);
            }
            other => panic!("insert failed: {other:?}"),
        }
        assert_eq!(store.len("artisan"), 2);
    }

    #[tokio::test]
    async fn memory_store_filters_and_limits_in_insertion_order() {
        let store = MemoryStore::new("test");
        seed(&store).await;

        let pottery = Filter::new().with("craft_type", "pottery");
        let docs = match store.get_documents("artisan", &pottery, 10).await {
            Ok(d) => d,
            Err(e) => panic!("query failed: {e}"),
        };
        let names: Vec<_> = docs.iter().filter_map(|d| d.fields.get_str("name").ok()).collect();
        assert_eq!(names, ["A", "C"]);

        let limited = match store.get_documents("artisan", &Filter::new(), 2).await {
            Ok(d) => d,
            Err(e) => panic!("query failed: {e}"),
        };
        assert_eq!(limited.len(), 2);
    }

    #[tokio::test]
    async fn memory_store_unknown_collection_is_empty() {
        let store = MemoryStore::new("test");
        let docs = store.get_documents("nothing", &Filter::new(), 24).await;
        assert!(docs.is_ok_and(|d| d.is_empty()));
        assert_eq!(store.len("nothing"), 0);
    }

    #[tokio::test]
    async fn memory_store_lists_collection_names() {
        let store = MemoryStore::new("handcrafted");
        seed(&store).await;
        let _ = store.create_document("event", &doc! { "name": "visit" }).await;
        let names = store.collection_names().await;
        assert!(names.is_ok_and(|n| n == ["artisan", "event"]));
        assert_eq!(store.name(), "handcrafted");
    }
}
