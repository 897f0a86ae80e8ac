//! Form state controller: the in-memory draft of one entity.

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use super::preview::FileHandle;
use super::schema::{FieldKind, FieldSpec, FormSchema};

/// Text the upstream store writes for an absent optional field.
const UNDEFINED_SENTINEL: &str = "undefined";

/// Flat name -> value view of a fetched entity (absent fields omitted).
pub type FieldMap = BTreeMap<String, String>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Field {0} does not hold text")]
    NotText(String),

    #[error("Field {0} does not hold a file")]
    NotFile(String),
}

/// A single field's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    File(FileHandle),
    Empty,
}

impl FieldValue {
    fn default_for(spec: &FieldSpec) -> Self {
        if spec.kind.is_file() {
            FieldValue::Empty
        } else {
            FieldValue::Text(String::new())
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_file(&self) -> Option<&FileHandle> {
        match self {
            FieldValue::File(f) => Some(f),
            _ => None,
        }
    }
}

/// Declarative validation failure for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every declared field of a schema with its current value.
#[derive(Debug, Clone)]
pub struct FormRecord {
    schema: &'static FormSchema,
    values: HashMap<&'static str, FieldValue>,
}

impl FormRecord {
    /// A record with every declared field at its empty default.
    pub fn new(schema: &'static FormSchema) -> Self {
        let values = schema
            .fields
            .iter()
            .map(|spec| (spec.name, FieldValue::default_for(spec)))
            .collect();
        Self { schema, values }
    }

    pub fn schema(&self) -> &'static FormSchema {
        self.schema
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    /// Mutable access to a text field, for binding to an input widget.
    pub fn text_mut(&mut self, name: &str) -> Option<&mut String> {
        match self.values.get_mut(name) {
            Some(FieldValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn set(&mut self, name: &str, value: FieldValue) -> Result<(), FormError> {
        let spec = self
            .schema
            .field(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;

        match (&value, spec.kind.is_file()) {
            (FieldValue::Text(_), true) => return Err(FormError::NotText(name.to_string())),
            (FieldValue::File(_), false) => return Err(FormError::NotFile(name.to_string())),
            _ => {}
        }

        self.values.insert(spec.name, value);
        Ok(())
    }

    pub fn set_text(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        self.set(name, FieldValue::Text(value.into()))
    }

    /// Copy values from a fetched entity.
    ///
    /// Absent fields and the literal "undefined" become empty strings. File
    /// fields are left alone; remote assets are shown as previews instead.
    pub fn seed(&mut self, fields: &FieldMap) {
        for spec in self.schema.fields.iter().filter(|f| !f.kind.is_file()) {
            let value = fields
                .get(spec.name)
                .map(String::as_str)
                .filter(|v| *v != UNDEFINED_SENTINEL)
                .unwrap_or_default();
            self.values
                .insert(spec.name, FieldValue::Text(value.to_string()));
        }
    }

    /// Fields in declaration order with their values.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> + '_ {
        self.schema
            .fields
            .iter()
            .filter_map(|spec| self.values.get(spec.name).map(|v| (spec.name, v)))
    }

    /// Check required and email fields the way the form library would.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        for spec in self.schema.fields {
            let text = self.text(spec.name).map(str::trim);

            if let Some(message) = spec.required {
                let missing = match self.get(spec.name) {
                    Some(FieldValue::Text(s)) => s.is_empty(),
                    Some(FieldValue::File(_)) => false,
                    Some(FieldValue::Empty) | None => true,
                };
                if missing {
                    errors.push(FieldError {
                        field: spec.name,
                        message: message.to_string(),
                    });
                    continue;
                }
            }

            if spec.kind == FieldKind::Email {
                if let Some(email) = text.filter(|t| !t.is_empty()) {
                    if !email_pattern().is_match(email) {
                        errors.push(FieldError {
                            field: spec.name,
                            message: "Enter a valid email address".to_string(),
                        });
                    }
                }
            }
        }

        errors
    }
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap_or_else(|e| {
            panic!("Invalid email pattern: {}", e);
        })
    })
}
