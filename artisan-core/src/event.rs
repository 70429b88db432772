use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;
use crate::fields::FieldReader;
use crate::id::Collection;

/// An analytics ping as submitted by a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Event name, e.g. `"cta_click"`.
    pub name: String,
    /// Arbitrary metadata; key order is preserved.
    pub meta: Option<IndexMap<String, Value>>,
}

impl Event {
    /// Validates an inbound JSON payload.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] if `name` is missing or `meta` is not an object.
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let mut r = FieldReader::new(value)?;
        let name = r.required_str("name");
        let meta = r
            .optional_object("meta")
            .map(|m| m.iter().map(|(k, v)| (k.clone(), v.clone())).collect());
        r.finish(Self { name, meta })
    }

    /// Stamps the event with `ts`, producing the persisted record.
    #[must_use]
    pub fn into_record(self, ts: DateTime<Utc>) -> TrackedEvent {
        TrackedEvent { name: self.name, meta: self.meta.unwrap_or_default(), ts }
    }
}

/// An event as written to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedEvent {
    pub name: String,
    pub meta: IndexMap<String, Value>,
    /// When the handler received the event.
    pub ts: DateTime<Utc>,
}

impl Collection for TrackedEvent {
    const NAME: &'static str = "event";
}
