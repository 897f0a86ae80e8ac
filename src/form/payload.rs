//! Transmission payload: a flat snapshot of a form record.
//!
//! Every declared field is included, empty or not. Updates are whole-record
//! replacements (last write wins); no diffing against the fetched entity.

use reqwest::multipart::{Form, Part};

use super::preview::FileHandle;
use super::record::{FieldValue, FormRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadPart {
    Text(String),
    File(FileHandle),
}

/// Ordered (name, part) pairs ready for a multipart upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    parts: Vec<(String, PayloadPart)>,
}

impl Payload {
    /// Snapshot a record. `Empty` file fields are sent as empty text.
    pub fn from_record(record: &FormRecord) -> Self {
        let parts = record
            .entries()
            .map(|(name, value)| {
                let part = match value {
                    FieldValue::Text(s) => PayloadPart::Text(s.clone()),
                    FieldValue::File(handle) => PayloadPart::File(handle.clone()),
                    FieldValue::Empty => PayloadPart::Text(String::new()),
                };
                (name.to_string(), part)
            })
            .collect();
        Self { parts }
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&PayloadPart> {
        self.parts.iter().find(|(n, _)| n == name).map(|(_, p)| p)
    }

    #[cfg(test)]
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            PayloadPart::Text(s) => Some(s),
            PayloadPart::File(_) => None,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn file_count(&self) -> usize {
        self.parts
            .iter()
            .filter(|(_, p)| matches!(p, PayloadPart::File(_)))
            .count()
    }

    /// Build the multipart body.
    pub fn to_multipart(&self) -> Result<Form, reqwest::Error> {
        let mut form = Form::new();
        for (name, part) in &self.parts {
            form = match part {
                PayloadPart::Text(value) => form.text(name.clone(), value.clone()),
                PayloadPart::File(handle) => {
                    let part = Part::bytes(handle.bytes.to_vec())
                        .file_name(handle.file_name.clone())
                        .mime_str(&handle.mime)?;
                    form.part(name.clone(), part)
                }
            };
        }
        Ok(form)
    }
}
