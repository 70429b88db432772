//! Conversions between records and stored documents.

use artisan_core::DocumentId;
use chrono::{DateTime, Utc};
use mongodb::bson::{self, Bson, Document};
use serde::{de::DeserializeOwned, Serialize};

use crate::StoreError;

/// Storage key of the store-assigned identifier.
pub const ID_FIELD: &str = "_id";

/// Conjunctive equality filter: every field must equal its value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter(Document);

impl Filter {
    /// An empty filter, matching every document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the constraint `field == value`.
    #[must_use]
    pub fn with(mut self, field: &str, value: impl Into<Bson>) -> Self {
        self.0.insert(field, value.into());
        self
    }

    /// Adds `field == value` only when `value` is `Some`.
    #[must_use]
    pub fn with_opt(self, field: &str, value: Option<impl Into<Bson>>) -> Self {
        match value {
            Some(v) => self.with(field, v),
            None => self,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if `doc` satisfies every constraint.
    #[must_use]
    pub fn matches(&self, doc: &Document) -> bool {
        self.0.iter().all(|(field, value)| doc.get(field) == Some(value))
    }

    /// The filter in MongoDB query form.
    #[must_use]
    pub fn as_document(&self) -> &Document {
        &self.0
    }
}

/// A document read back from the store with its identifier normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    /// The identifier, rendered as a string.
    pub id: DocumentId,
    /// Every other field of the document.
    pub fields: Document,
}

impl StoredDocument {
    /// Splits the `_id` field off a raw document.
    ///
    /// # Errors
    /// Returns [`StoreError::Decode`] if the document has no `_id`.
    pub fn from_raw(mut doc: Document) -> Result<Self, StoreError> {
        let id = doc
            .remove(ID_FIELD)
            .ok_or_else(|| StoreError::Decode(format!("document has no {ID_FIELD} field")))?;
        Ok(Self { id: normalize_id(&id), fields: doc })
    }

    /// Deserializes the remaining fields into `T`.
    ///
    /// # Errors
    /// Returns [`StoreError::Decode`] if the fields do not fit `T`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<Record<T>, StoreError> {
        let body = bson::from_document(self.fields)
            .map_err(|e| StoreError::Decode(format!("document {}: {e}", self.id)))?;
        Ok(Record { id: self.id, body })
    }
}

/// A typed record together with its identifier.
///
/// Serializes as the record's own fields plus a string `id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record<T> {
    pub id: DocumentId,
    #[serde(flatten)]
    pub body: T,
}

/// Renders a stored identifier as a string.
///
/// `ObjectId`s become 24-char lowercase hex, strings pass through, and any
/// other value uses its BSON display form.
#[must_use]
pub fn normalize_id(id: &Bson) -> DocumentId {
    match id {
        Bson::ObjectId(oid) => DocumentId::new(oid.to_hex()),
        Bson::String(s) => DocumentId::new(s.clone()),
        other => DocumentId::new(other.to_string()),
    }
}

/// Serializes a record into a storable document.
///
/// # Errors
/// Returns [`StoreError::Serialize`] if `record` does not serialize to a map.
pub fn to_document<T: Serialize>(record: &T) -> Result<Document, StoreError> {
    Ok(bson::to_document(record)?)
}

/// Stores `ts` under `field` as a native BSON datetime, replacing any
/// serialized form already present. Precision drops to milliseconds.
pub fn set_datetime(doc: &mut Document, field: &str, ts: DateTime<Utc>) {
    doc.insert(field, Bson::DateTime(bson::DateTime::from_millis(ts.timestamp_millis())));
}
