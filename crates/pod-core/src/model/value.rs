//! Valores de campo y su tipo declarado.
use serde::{Deserialize, Serialize};

use super::AttachmentDescriptor;

/// Valor de un campo del formulario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    /// Sin valor (slot de adjunto vacío o campo no declarado).
    #[default]
    Empty,
    Text(String),
    Flag(bool),
    List(Vec<String>),
    Attachment(AttachmentDescriptor),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_attachment(&self) -> Option<&AttachmentDescriptor> {
        match self {
            FieldValue::Attachment(a) => Some(a),
            _ => None,
        }
    }

    /// Vacío en el sentido de "requerido": texto en blanco (trim), lista sin
    /// elementos, flag en false o ausencia de valor.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Empty => true,
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Flag(b) => !b,
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Attachment(_) => false,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Flag(b)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(items: Vec<&str>) -> Self {
        FieldValue::List(items.into_iter().map(str::to_string).collect())
    }
}

/// Tipo declarado de un campo. Determina el valor por defecto con el que se
/// siembra el snapshot y cómo se comporta `remove`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    Text,
    Flag,
    /// Lista de strings; `max` limita la cantidad de elementos aceptados por
    /// `push_unique`.
    List { max: Option<usize> },
    Attachment(super::AttachmentKind),
}

impl FieldKind {
    pub fn default_value(&self) -> FieldValue {
        match self {
            FieldKind::Text => FieldValue::Text(String::new()),
            FieldKind::Flag => FieldValue::Flag(false),
            FieldKind::List { .. } => FieldValue::List(Vec::new()),
            FieldKind::Attachment(_) => FieldValue::Empty,
        }
    }

    /// `Empty` se acepta para cualquier tipo (equivale a limpiar).
    pub fn accepts(&self, value: &FieldValue) -> bool {
        matches!((self, value),
                 (_, FieldValue::Empty)
                 | (FieldKind::Text, FieldValue::Text(_))
                 | (FieldKind::Flag, FieldValue::Flag(_))
                 | (FieldKind::List { .. }, FieldValue::List(_))
                 | (FieldKind::Attachment(_), FieldValue::Attachment(_)))
    }

    pub fn attachment_kind(&self) -> Option<super::AttachmentKind> {
        match self {
            FieldKind::Attachment(kind) => Some(*kind),
            _ => None,
        }
    }
}
