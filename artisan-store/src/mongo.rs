//! MongoDB-backed [`DocumentStore`].

use artisan_core::DocumentId;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::Document, Client, Database};
use tracing::debug;

use crate::document::{normalize_id, Filter, StoredDocument};
use crate::{DocumentStore, StoreError};

/// A handle to one MongoDB database.
///
/// The driver connects lazily and pools connections internally; the handle
/// is created once at startup and shared.
#[derive(Debug, Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Parse `uri` and select the database `name`.
    ///
    /// # Errors
    /// Returns [`StoreError::Connection`] if the connection string is invalid
    /// or its hosts cannot be resolved.
    pub async fn connect(uri: &str, name: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        debug!(database = name, "mongodb client created");
        Ok(Self::from_database(client.database(name)))
    }

    /// Wrap an existing database handle.
    #[must_use]
    pub fn from_database(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn create_document(
        &self,
        collection: &str,
        document: &Document,
    ) -> Result<DocumentId, StoreError> {
        let result = self
            .db
            .collection::<Document>(collection)
            .insert_one(document)
            .await
            .map_err(|e| StoreError::Write {
                collection: collection.to_owned(),
                reason: e.to_string(),
            })?;
        Ok(normalize_id(&result.inserted_id))
    }

    async fn get_documents(
        &self,
        collection: &str,
        filter: &Filter,
        limit: u32,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        let read_err = |e: mongodb::error::Error| StoreError::Read {
            collection: collection.to_owned(),
            reason: e.to_string(),
        };
        let docs: Vec<Document> = self
            .db
            .collection::<Document>(collection)
            .find(filter.as_document().clone())
            .limit(i64::from(limit))
            .await
            .map_err(read_err)?
            .try_collect()
            .await
            .map_err(read_err)?;
        docs.into_iter().map(StoredDocument::from_raw).collect()
    }

    async fn collection_names(&self) -> Result<Vec<String>, StoreError> {
        self.db.list_collection_names().await.map_err(|e| StoreError::Read {
            collection: self.db.name().to_owned(),
            reason: e.to_string(),
        })
    }

    fn name(&self) -> &str {
        self.db.name()
    }
}
