//! Document store abstraction trait.
//!
//! Allows swapping between MongoDB and the in-memory store without changing
//! the request handlers.

use artisan_core::{Collection, DocumentId};
use async_trait::async_trait;
use mongodb::bson::Document;
use serde::{de::DeserializeOwned, Serialize};

use crate::document::{to_document, Filter, Record, StoredDocument};
use crate::StoreError;

/// Collection-oriented persistence.
///
/// Implementations must be `Send + Sync` so a single handle can be shared by
/// every request.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert `document` into `collection` and return its new identifier.
    ///
    /// # Errors
    /// Returns [`StoreError::Write`] if the store rejects the insert or is unreachable.
    async fn create_document(
        &self,
        collection: &str,
        document: &Document,
    ) -> Result<DocumentId, StoreError>;

    /// Return up to `limit` documents of `collection` matching `filter`.
    ///
    /// Order is whatever the store yields natively.
    ///
    /// # Errors
    /// Returns [`StoreError::Read`] on query failure, or [`StoreError::Decode`]
    /// if a document lacks an identifier.
    async fn get_documents(
        &self,
        collection: &str,
        filter: &Filter,
        limit: u32,
    ) -> Result<Vec<StoredDocument>, StoreError>;

    /// Names of the collections in the database.
    ///
    /// # Errors
    /// Returns [`StoreError::Read`] if the store cannot be queried.
    async fn collection_names(&self) -> Result<Vec<String>, StoreError>;

    /// Name of the database this store writes to.
    fn name(&self) -> &str;
}

/// Serialize `record` and insert it into its collection.
///
/// # Errors
/// Returns [`StoreError::Serialize`] or any error of
/// [`DocumentStore::create_document`].
pub async fn insert<T>(store: &dyn DocumentStore, record: &T) -> Result<DocumentId, StoreError>
where
    T: Serialize + Collection + Sync,
{
    let document = to_document(record)?;
    store.create_document(T::NAME, &document).await
}

/// List up to `limit` records of type `T` matching `filter`.
///
/// # Errors
/// Returns any error of [`DocumentStore::get_documents`], or
/// [`StoreError::Decode`] if a document does not fit `T`.
pub async fn list<T>(
    store: &dyn DocumentStore,
    filter: &Filter,
    limit: u32,
) -> Result<Vec<Record<T>>, StoreError>
where
    T: DeserializeOwned + Collection,
{
    store
        .get_documents(T::NAME, filter, limit)
        .await?
        .into_iter()
        .map(StoredDocument::decode)
        .collect()
}
