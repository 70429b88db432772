//! Core types for the artisan directory service.
//!
//! Defines the persisted entities (artisans, registrations, analytics
//! events), their payload validation, and the store identifier type.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod artisan;
pub mod error;
pub mod event;
mod fields;
pub mod id;
pub mod registration;

pub use artisan::{Artisan, ArtisanFilter, ArtisanQuery, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
pub use error::{FieldError, FieldErrorKind, ValidationError};
pub use event::{Event, TrackedEvent};
pub use id::{Collection, DocumentId};
pub use registration::{is_valid_email, Registration, DEFAULT_SOURCE};

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;

    use super::*;

    #[test]
    fn collection_names_are_distinct() {
        let names = [Artisan::NAME, Registration::NAME, TrackedEvent::NAME];
        assert_eq!(names, ["artisan", "registration", "event"]);
    }

    #[test]
    fn document_id_serializes_as_plain_string() {
        let id = DocumentId::new("65f0c0ffee0000000000abcd");
        let json = match serde_json::to_string(&id) {
            Ok(s) => s,
            Err(e) => panic!("serialization failed: {e}"),
        };
        assert_eq!(json, "\"65f0c0ffee0000000000abcd\"");
        assert_eq!(id.to_string(), "65f0c0ffee0000000000abcd");
    }

    #[test]
    fn validation_error_display_lists_fields() {
        let err = match Artisan::from_json(&json!({})) {
            Ok(a) => panic!("expected error, got {a:?}"),
            Err(e) => e,
        };
        let msg = err.to_string();
        assert!(msg.contains("name: field required"), "got {msg}");
        assert!(msg.contains("region: field required"), "got {msg}");
    }

    #[test]
    fn field_error_serializes_reason_text() {
        let err = FieldError::new("limit", FieldErrorKind::WrongType { expected: "integer" });
        let value = match serde_json::to_value(&err) {
            Ok(v) => v,
            Err(e) => panic!("serialization failed: {e}"),
        };
        assert_eq!(value, json!({"field": "limit", "reason": "expected integer"}));
    }

    #[test]
    fn event_meta_defaults_to_empty_object_and_keeps_order() {
        let ts = Utc::now();
        let bare = match Event::from_json(&json!({"name": "visit"})) {
            Ok(e) => e.into_record(ts),
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert!(bare.meta.is_empty());
        assert_eq!(bare.ts, ts);

        let tagged = match Event::from_json(&json!({"name": "click", "meta": {"z": 1, "a": 2}})) {
            Ok(e) => e.into_record(ts),
            Err(e) => panic!("unexpected error: {e}"),
        };
        let keys: Vec<&str> = tagged.meta.keys().map(String::as_str).collect();
        assert_eq!(keys, ["z", "a"]);
    }

    #[test]
    fn event_rejects_non_object_meta() {
        let err = Event::from_json(&json!({"name": "click", "meta": [1, 2]})).err();
        assert!(err.is_some_and(|e| e.has_field("meta")));
    }
}
