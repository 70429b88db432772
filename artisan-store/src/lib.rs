//! Document store adapter for the artisan directory service.
//!
//! Inserts records into named collections and lists them back through a
//! simple equality filter, normalizing store identifiers to strings.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod backend;
pub mod document;
pub mod error;
pub mod memory;
pub mod mongo;

use std::sync::Arc;

pub use backend::{insert, list, DocumentStore};
pub use document::{normalize_id, set_datetime, to_document, Filter, Record, StoredDocument};
pub use error::StoreError;
pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use mongodb::bson;

/// Connection-string prefix that selects the in-memory store.
pub const MEMORY_SCHEME: &str = "memory://";

/// Open the store named by `url`, using database `name`.
///
/// `memory://…` yields a fresh [`MemoryStore`]; anything else is handed to
/// the MongoDB driver.
///
/// # Errors
/// Returns [`StoreError::Connection`] if the MongoDB connection string is invalid.
pub async fn connect(url: &str, name: &str) -> Result<Arc<dyn DocumentStore>, StoreError> {
    if url.starts_with(MEMORY_SCHEME) {
        tracing::info!(database = name, "using in-memory document store");
        return Ok(Arc::new(MemoryStore::new(name)));
    }
    let store = MongoStore::connect(url, name).await?;
    tracing::info!(database = name, "using mongodb document store");
    Ok(Arc::new(store))
}

#[cfg(test)]
mod tests {
    use artisan_core::{Artisan, ArtisanQuery, Collection};
    use serde_json::json;

    use super::*;

    fn artisan(name: &str, craft: &str, region: &str) -> Artisan {
        match Artisan::from_json(&json!({ "name": name, "craft_type": craft, "region": region })) {
            Ok(a) => a,
            Err(e) => panic!("invalid fixture: {e}"),
        }
    }

    #[tokio::test]
    async fn connect_memory_scheme_selects_memory_store() {
        let store = match connect("memory://", "scratch").await {
            Ok(s) => s,
            Err(e) => panic!("connect failed: {e}"),
        };
        assert_eq!(store.name(), "scratch");
    }

    #[tokio::test]
    async fn connect_rejects_malformed_mongodb_uri() {
        let result = connect("definitely-not-a-uri", "db").await;
        assert!(matches!(result, Err(StoreError::Connection(_))));
    }

    #[tokio::test]
    async fn typed_insert_then_list_round_trips_with_string_id() {
        let store = MemoryStore::new("test");
        let id = match insert(&store, &artisan("A", "pottery", "X")).await {
            Ok(id) => id,
            Err(e) => panic!("insert failed: {e}"),
        };
        assert!(!id.as_str().is_empty());
        assert_eq!(store.len(Artisan::NAME), 1);

        let records: Vec<Record<Artisan>> = match list(&store, &Filter::new(), 24).await {
            Ok(r) => r,
            Err(e) => panic!("list failed: {e}"),
        };
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, id);
        assert_eq!(records[0].body.name, "A");
        assert!(records[0].body.portfolio_images.is_empty());
    }

    #[tokio::test]
    async fn typed_list_honours_artisan_filter() {
        let store = MemoryStore::new("test");
        for a in [artisan("A", "pottery", "X"), artisan("B", "weaving", "X")] {
            if let Err(e) = insert(&store, &a).await {
                panic!("insert failed: {e}");
            }
        }
        let query = ArtisanQuery { category: Some("weaving".to_owned()), ..ArtisanQuery::default() };
        let filter = match query.validate() {
            Ok(f) => f,
            Err(e) => panic!("invalid query: {e}"),
        };
        let store_filter = Filter::new().with_opt("craft_type", filter.craft_type);
        let records: Vec<Record<Artisan>> = match list(&store, &store_filter, filter.limit).await {
            Ok(r) => r,
            Err(e) => panic!("list failed: {e}"),
        };
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].body.craft_type, "weaving");
    }
}
