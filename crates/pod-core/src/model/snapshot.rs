//! `FormSnapshot`: mapa campo -> valor, única fuente de verdad del formulario.
//!
//! El orden de inserción no tiene semántica; se usa `IndexMap` para que la
//! serialización hacia los colaboradores sea estable.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{AttachmentDescriptor, FieldValue};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormSnapshot {
    fields: IndexMap<String, FieldValue>,
}

impl FormSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Texto del campo o "" si no es texto.
    pub fn text(&self, field: &str) -> &str {
        self.get(field).and_then(FieldValue::as_text).unwrap_or("")
    }

    pub fn flag(&self, field: &str) -> bool {
        self.get(field).and_then(FieldValue::as_flag).unwrap_or(false)
    }

    pub fn list(&self, field: &str) -> &[String] {
        self.get(field).and_then(FieldValue::as_list).unwrap_or(&[])
    }

    pub fn attachment(&self, field: &str) -> Option<&AttachmentDescriptor> {
        self.get(field).and_then(FieldValue::as_attachment)
    }

    pub(crate) fn insert(&mut self, field: String, value: FieldValue) {
        self.fields.insert(field, value);
    }

    pub(crate) fn get_mut(&mut self, field: &str) -> Option<&mut FieldValue> {
        self.fields.get_mut(field)
    }

    pub(crate) fn remove(&mut self, field: &str) -> Option<FieldValue> {
        self.fields.shift_remove(field)
    }
}

impl FromIterator<(String, FieldValue)> for FormSnapshot {
    fn from_iter<T: IntoIterator<Item = (String, FieldValue)>>(iter: T) -> Self {
        Self { fields: iter.into_iter().collect() }
    }
}
