//! Field-level validation of raw JSON payloads.
//!
//! A [`Fields`] reader walks one JSON object and collects every violated
//! constraint instead of stopping at the first one, so a client gets the full
//! list of problems in a single response.

use poem_openapi::{Enum, Object};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use crate::records::Record;

const ROOT: &str = "body";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Enum)]
#[serde(rename_all = "snake_case")]
#[oai(rename_all = "snake_case")]
pub enum ViolationKind {
    Missing,
    WrongType,
    OutOfRange,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Object)]
pub struct FieldViolation {
    pub field: String,
    pub kind: ViolationKind,
    pub message: String,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid payload: {}", describe(.violations))]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

fn describe(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.violations.iter().map(|v| v.field.as_str())
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// Reads typed fields out of one JSON object, recording violations as it goes.
///
/// Accessors always return a value (an empty placeholder when the field is
/// invalid), so a record can be assembled unconditionally and handed to
/// [`Fields::finish`], which discards it if anything was violated.
pub struct Fields<'a> {
    object: Option<&'a Map<String, JsonValue>>,
    path: String,
    violations: Vec<FieldViolation>,
}

impl<'a> Fields<'a> {
    pub fn new(payload: &'a JsonValue) -> Self {
        Self::at(payload, String::new())
    }

    /// Reader for a nested object, e.g. the element `[3]` of an array body.
    pub fn at(payload: &'a JsonValue, path: String) -> Self {
        let mut fields = Self {
            object: None,
            path,
            violations: vec![],
        };
        match payload {
            JsonValue::Object(object) => fields.object = Some(object),
            JsonValue::Null => {
                fields.violate_root(ViolationKind::Missing, "a JSON object is required".into())
            }
            other => fields.violate_root(
                ViolationKind::WrongType,
                format!("expected an object, got {}", json_type_name(other)),
            ),
        }
        fields
    }

    fn root_path(&self) -> String {
        if self.path.is_empty() {
            ROOT.to_owned()
        } else {
            self.path.clone()
        }
    }

    fn field_path(&self, name: &str) -> String {
        if self.path.is_empty() {
            name.to_owned()
        } else {
            format!("{}.{name}", self.path)
        }
    }

    fn violate_root(&mut self, kind: ViolationKind, message: String) {
        self.violations.push(FieldViolation {
            field: self.root_path(),
            kind,
            message,
        });
    }

    fn violate(&mut self, name: &str, kind: ViolationKind, message: String) {
        self.violations.push(FieldViolation {
            field: self.field_path(name),
            kind,
            message,
        });
    }

    pub fn required_string(&mut self, name: &str) -> String {
        let Some(object) = self.object else {
            return String::new();
        };
        match object.get(name) {
            None | Some(JsonValue::Null) => {
                self.violate(name, ViolationKind::Missing, "field required".into());
                String::new()
            }
            Some(JsonValue::String(value)) => value.clone(),
            Some(other) => {
                self.violate(
                    name,
                    ViolationKind::WrongType,
                    format!("expected a string, got {}", json_type_name(other)),
                );
                String::new()
            }
        }
    }

    /// A required string that must contain something other than whitespace.
    pub fn required_non_empty_string(&mut self, name: &str) -> String {
        let before = self.violations.len();
        let value = self.required_string(name);
        if self.object.is_some() && self.violations.len() == before && value.trim().is_empty() {
            self.violate(name, ViolationKind::OutOfRange, "must not be empty".into());
        }
        value
    }

    /// `null` and absence both read as `None`.
    pub fn optional_string(&mut self, name: &str) -> Option<String> {
        match self.object?.get(name) {
            None | Some(JsonValue::Null) => None,
            Some(JsonValue::String(value)) => Some(value.clone()),
            Some(other) => {
                self.violate(
                    name,
                    ViolationKind::WrongType,
                    format!("expected a string, got {}", json_type_name(other)),
                );
                None
            }
        }
    }

    pub fn into_violations(self) -> Vec<FieldViolation> {
        self.violations
    }

    pub fn finish<T>(self, value: T) -> Result<T, ValidationError> {
        if self.violations.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError {
                violations: self.violations,
            })
        }
    }
}

/// Validates a JSON array whose every element must be a `T`.
pub fn validate_list<T: Record>(payload: &JsonValue) -> Result<Vec<T>, ValidationError> {
    let JsonValue::Array(items) = payload else {
        return Err(ValidationError {
            violations: vec![FieldViolation {
                field: ROOT.to_owned(),
                kind: ViolationKind::WrongType,
                message: format!("expected an array, got {}", json_type_name(payload)),
            }],
        });
    };

    let mut records = Vec::with_capacity(items.len());
    let mut violations = vec![];
    for (index, item) in items.iter().enumerate() {
        let mut fields = Fields::at(item, format!("[{index}]"));
        records.push(T::read(&mut fields));
        violations.extend(fields.into_violations());
    }

    if violations.is_empty() {
        Ok(records)
    } else {
        Err(ValidationError { violations })
    }
}
