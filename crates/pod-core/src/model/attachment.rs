//! Adjuntos binarios: lo que el usuario sube (`AttachmentUpload`) y el
//! descriptor que queda en el Field Store una vez validado y sondeado.
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    Audio,
    Image,
    Transcript,
}

impl fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AttachmentKind::Audio => "audio",
            AttachmentKind::Image => "image",
            AttachmentKind::Transcript => "transcript",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Metadatos derivados por el probe: duración para audio, dimensiones y
/// preview para imagen. Las transcripciones no derivan nada.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttachmentMetadata {
    pub duration_ms: Option<u64>,
    pub dimensions: Option<Dimensions>,
    /// Handle a la representación reducida que muestra la UI.
    pub preview_handle: Option<String>,
}

/// Archivo seleccionado por el usuario, todavía sin validar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentUpload {
    /// Handle opaco al blob (object URL, ruta temporal...).
    pub source_handle: String,
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

impl AttachmentUpload {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, size_bytes: u64) -> Self {
        let file_name = file_name.into();
        Self { source_handle: format!("blob:{file_name}"),
               file_name,
               mime_type: mime_type.into(),
               size_bytes }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentDescriptor {
    pub kind: AttachmentKind,
    pub source_handle: String,
    pub file_name: String,
    pub size_bytes: u64,
    pub mime_type: String,
    pub metadata: AttachmentMetadata,
}

impl AttachmentDescriptor {
    pub fn from_upload(kind: AttachmentKind, upload: AttachmentUpload, metadata: AttachmentMetadata) -> Self {
        Self { kind,
               source_handle: upload.source_handle,
               file_name: upload.file_name,
               size_bytes: upload.size_bytes,
               mime_type: upload.mime_type,
               metadata }
    }
}
