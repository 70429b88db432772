//! Field-by-field reader over a JSON object that accumulates errors.
//!
//! Readers return a placeholder value when a field is rejected so that the
//! whole payload is inspected and every offending field gets reported.

use serde_json::{Map, Value};

use crate::error::{FieldError, FieldErrorKind, ValidationError};

pub(crate) struct FieldReader<'a> {
    obj: &'a Map<String, Value>,
    errors: Vec<FieldError>,
}

impl<'a> FieldReader<'a> {
    /// Starts reading `value`, which must be a JSON object.
    pub(crate) fn new(value: &'a Value) -> Result<Self, ValidationError> {
        match value.as_object() {
            Some(obj) => Ok(Self { obj, errors: Vec::new() }),
            None => Err(ValidationError::single(
                "body",
                FieldErrorKind::WrongType { expected: "object" },
            )),
        }
    }

    pub(crate) fn push(&mut self, field: &str, kind: FieldErrorKind) {
        self.errors.push(FieldError::new(field, kind));
    }

    /// Present and non-null, otherwise `None`.
    fn get(&self, field: &str) -> Option<&'a Value> {
        self.obj.get(field).filter(|v| !v.is_null())
    }

    pub(crate) fn required_str(&mut self, field: &str) -> String {
        match self.get(field) {
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                self.push(field, FieldErrorKind::WrongType { expected: "string" });
                String::new()
            }
            None => {
                self.push(field, FieldErrorKind::Missing);
                String::new()
            }
        }
    }

    pub(crate) fn optional_str(&mut self, field: &str) -> Option<String> {
        match self.get(field) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                self.push(field, FieldErrorKind::WrongType { expected: "string" });
                None
            }
            None => None,
        }
    }

    /// An absent field takes `default`; an explicit `null` stays unset.
    pub(crate) fn str_or(&mut self, field: &str, default: &str) -> Option<String> {
        if self.obj.contains_key(field) {
            self.optional_str(field)
        } else {
            Some(default.to_owned())
        }
    }

    pub(crate) fn required_bool(&mut self, field: &str) -> bool {
        match self.get(field) {
            Some(Value::Bool(b)) => *b,
            Some(_) => {
                self.push(field, FieldErrorKind::WrongType { expected: "boolean" });
                false
            }
            None => {
                self.push(field, FieldErrorKind::Missing);
                false
            }
        }
    }

    /// An absent field takes `default`; `null` is rejected.
    pub(crate) fn bool_or(&mut self, field: &str, default: bool) -> bool {
        match self.obj.get(field) {
            None => default,
            Some(Value::Bool(b)) => *b,
            Some(_) => {
                self.push(field, FieldErrorKind::WrongType { expected: "boolean" });
                default
            }
        }
    }

    /// A list of strings; absent or `null` reads as empty.
    pub(crate) fn string_list(&mut self, field: &str) -> Vec<String> {
        match self.get(field) {
            None => Vec::new(),
            Some(Value::Array(items)) => {
                let strings: Option<Vec<String>> =
                    items.iter().map(|v| v.as_str().map(str::to_owned)).collect();
                strings.unwrap_or_else(|| {
                    self.push(field, FieldErrorKind::WrongType { expected: "list of strings" });
                    Vec::new()
                })
            }
            Some(_) => {
                self.push(field, FieldErrorKind::WrongType { expected: "list of strings" });
                Vec::new()
            }
        }
    }

    pub(crate) fn optional_object(&mut self, field: &str) -> Option<&'a Map<String, Value>> {
        match self.get(field) {
            Some(Value::Object(map)) => Some(map),
            Some(_) => {
                self.push(field, FieldErrorKind::WrongType { expected: "object" });
                None
            }
            None => None,
        }
    }

    /// Returns `value` if no field was rejected.
    pub(crate) fn finish<T>(self, value: T) -> Result<T, ValidationError> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError { errors: self.errors })
        }
    }
}
