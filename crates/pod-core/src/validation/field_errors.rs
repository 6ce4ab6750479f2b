use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Errores por campo (campo -> mensaje legible). Se recalcula completo en cada
/// pasada de validación, nunca se parchea incrementalmente.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors {
    inner: BTreeMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra el mensaje sólo si el campo no tiene ya uno: la primera regla
    /// que falla gana.
    pub fn insert_first(&mut self, field: &str, message: impl Into<String>) {
        self.inner.entry(field.to_string()).or_insert_with(|| message.into());
    }

    /// Reemplaza el mensaje de un campo (errores de adjuntos).
    pub fn set(&mut self, field: &str, message: impl Into<String>) {
        self.inner.insert(field.to_string(), message.into());
    }

    pub fn clear_field(&mut self, field: &str) {
        self.inner.remove(field);
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.inner.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.inner.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
