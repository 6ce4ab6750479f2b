//! Colaboradores externos del workflow.
//!
//! Cada trait es un sustituto de una llamada real al backend (fuera de
//! alcance); `pod-adapters` provee implementaciones en memoria. Se inyectan al
//! construir la sesión.
use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::model::{AttachmentKind, AttachmentMetadata, AttachmentUpload, FormSnapshot};

/// Persistencia de borradores (autosave y "guardar borrador").
#[async_trait]
pub trait DraftStore: Send + Sync {
    async fn save_draft(&self, session_id: Uuid, snapshot: &FormSnapshot) -> Result<(), ServiceError>;
}

/// Servicio de publicación, invocado por el submit final.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, session_id: Uuid, snapshot: &FormSnapshot) -> Result<PublishReceipt, ServiceError>;
}

/// Deriva metadatos de un adjunto (duración de audio, dimensiones de imagen).
#[async_trait]
pub trait MetadataProbe: Send + Sync {
    async fn probe(&self, upload: &AttachmentUpload, kind: AttachmentKind) -> Result<AttachmentMetadata, ServiceError>;
}

/// Señala al host que cambie de pantalla.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &Route);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishReceipt {
    /// Id del recurso creado/actualizado por el servicio.
    pub resource_id: Uuid,
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Route(String);

impl Route {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
