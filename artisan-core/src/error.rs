use std::fmt;

use serde::Serialize;

/// Why a single payload field was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FieldErrorKind {
    /// A required field was absent or `null`.
    Missing,
    /// The field was present with the wrong JSON type.
    WrongType {
        /// Human-readable name of the expected type.
        expected: &'static str,
    },
    /// The value had the right type but fell outside the accepted bounds.
    OutOfRange {
        /// Description of the accepted range.
        reason: String,
    },
    /// The value is not a well-formed email address.
    InvalidEmail,
}

impl fmt::Display for FieldErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "field required"),
            Self::WrongType { expected } => write!(f, "expected {expected}"),
            Self::OutOfRange { reason } => write!(f, "out of range: {reason}"),
            Self::InvalidEmail => write!(f, "not a valid email address"),
        }
    }
}

/// A single offending field in an inbound payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Name of the field as it appears in the payload.
    pub field: String,
    /// What was wrong with it.
    pub kind: FieldErrorKind,
}

impl FieldError {
    /// Creates a field error for `field`.
    pub fn new(field: impl Into<String>, kind: FieldErrorKind) -> Self {
        Self { field: field.into(), kind }
    }
}

impl Serialize for FieldError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut s = serializer.serialize_struct("FieldError", 2)?;
        s.serialize_field("field", &self.field)?;
        s.serialize_field("reason", &self.kind.to_string())?;
        s.end()
    }
}

/// An inbound payload failed validation.
///
/// Carries every offending field, not just the first one found.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("validation failed: {}", summarize(.errors))]
pub struct ValidationError {
    /// The offending fields, in payload declaration order.
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// Builds an error for a single field.
    pub fn single(field: impl Into<String>, kind: FieldErrorKind) -> Self {
        Self { errors: vec![FieldError::new(field, kind)] }
    }

    /// Returns `true` if `field` is among the offending fields.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.kind))
        .collect::<Vec<_>>()
        .join("; ")
}
