//! Políticas de aceptación por tipo de adjunto: allow-list de MIME y techo de
//! bytes.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_AUDIO_BYTES, MAX_IMAGE_BYTES, MAX_TRANSCRIPT_BYTES};
use crate::errors::AttachmentError;
use crate::model::{AttachmentKind, AttachmentUpload};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentPolicy {
    pub kind: AttachmentKind,
    pub allowed_mime: Vec<String>,
    pub max_bytes: u64,
}

impl AttachmentPolicy {
    pub fn new(kind: AttachmentKind, allowed_mime: &[&str], max_bytes: u64) -> Self {
        Self { kind,
               allowed_mime: allowed_mime.iter().map(|m| m.to_string()).collect(),
               max_bytes }
    }

    pub fn audio() -> Self {
        Self::new(AttachmentKind::Audio,
                  &["audio/mpeg", "audio/mp3", "audio/wav", "audio/x-wav", "audio/aac", "audio/mp4", "audio/x-m4a",
                    "audio/ogg"],
                  MAX_AUDIO_BYTES)
    }

    pub fn image() -> Self {
        Self::new(AttachmentKind::Image, &["image/jpeg", "image/png", "image/webp"], MAX_IMAGE_BYTES)
    }

    pub fn transcript() -> Self {
        Self::new(AttachmentKind::Transcript,
                  &["text/plain", "text/vtt", "application/x-subrip", "application/pdf"],
                  MAX_TRANSCRIPT_BYTES)
    }

    /// El tipo se compara sin mayúsculas y sin parámetros (`; charset=...`).
    pub fn check(&self, upload: &AttachmentUpload) -> Result<(), AttachmentError> {
        let essence = upload.mime_type.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
        if !self.allowed_mime.iter().any(|m| *m == essence) {
            return Err(AttachmentError::UnsupportedType { mime: upload.mime_type.clone(),
                                                          kind: self.kind });
        }
        if upload.size_bytes == 0 {
            return Err(AttachmentError::EmptyFile);
        }
        if upload.size_bytes > self.max_bytes {
            return Err(AttachmentError::TooLarge { size: upload.size_bytes,
                                                   max: self.max_bytes });
        }
        Ok(())
    }
}

/// Conjunto de políticas indexado por tipo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentPolicies {
    by_kind: HashMap<AttachmentKind, AttachmentPolicy>,
}

impl AttachmentPolicies {
    pub fn get(&self, kind: AttachmentKind) -> &AttachmentPolicy {
        // Default cubre los tres tipos; `with_max_bytes` sólo reemplaza.
        &self.by_kind[&kind]
    }

    pub fn with_max_bytes(mut self, kind: AttachmentKind, max_bytes: u64) -> Self {
        if let Some(p) = self.by_kind.get_mut(&kind) {
            p.max_bytes = max_bytes;
        }
        self
    }

    pub fn with_policy(mut self, policy: AttachmentPolicy) -> Self {
        self.by_kind.insert(policy.kind, policy);
        self
    }
}

impl Default for AttachmentPolicies {
    fn default() -> Self {
        let by_kind = [AttachmentPolicy::audio(), AttachmentPolicy::image(), AttachmentPolicy::transcript()]
            .into_iter()
            .map(|p| (p.kind, p))
            .collect();
        Self { by_kind }
    }
}
