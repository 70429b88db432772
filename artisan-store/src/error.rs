//! Error types for the store crate.

/// Errors that can occur while talking to the document store.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    /// No store was configured for this process.
    #[error("document store is not configured")]
    Unavailable,

    /// The store could not be reached or the connection string is invalid.
    #[error("store connection failed: {0}")]
    Connection(String),

    /// The store rejected an insert.
    #[error("write to '{collection}' failed: {reason}")]
    Write { collection: String, reason: String },

    /// A query or metadata call failed.
    #[error("read from '{collection}' failed: {reason}")]
    Read { collection: String, reason: String },

    /// A record could not be converted to a storable document.
    #[error("cannot serialize record: {0}")]
    Serialize(#[from] mongodb::bson::ser::Error),

    /// A stored document could not be converted back into a record.
    #[error("cannot decode document: {0}")]
    Decode(String),
}
