use std::fmt;

use serde::{Deserialize, Serialize};

/// Store-assigned identifier of a persisted document.
///
/// Opaque to callers. For MongoDB-backed stores this is the 24-character hex
/// rendering of the document's `ObjectId`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Creates a `DocumentId` from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for DocumentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A record type persisted in its own named collection.
pub trait Collection {
    /// Logical collection name in the document store.
    const NAME: &'static str;
}
