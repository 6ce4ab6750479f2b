//! Tipos de evento de una sesión de formulario.
//!
//! Rol:
//! - Cada cambio de estado observable de la sesión (Field Store, paso
//!   actual, estado de guardado, adjuntos, submit) se emite como evento.
//! - La capa de presentación los consume en lugar de depender de un ciclo de
//!   re-render reactivo.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::AttachmentDescriptor;
use crate::ports::Route;
use crate::store::SaveStatus;
use crate::validation::FieldErrors;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkflowEventKind {
    /// Primer evento de una sesión.
    SessionStarted { workflow: String, step: String },
    FieldChanged { field: String, revision: u64 },
    FieldCleared { field: String, revision: u64 },
    SaveStatusChanged { status: SaveStatus },
    /// El paso cambió; la UI reinicia scroll y foco.
    StepChanged { from: String, to: String },
    StepBlocked { step: String, errors: FieldErrors },
    AttachmentStaged { field: String, descriptor: AttachmentDescriptor },
    AttachmentRejected { field: String, message: String },
    /// Resultado de un sondeo obsoleto (otro adjunto lo reemplazó).
    AttachmentDiscarded { field: String, token: u64 },
    DraftSaved { revision: u64 },
    DraftSaveFailed { message: String },
    SubmitBlocked { errors: FieldErrors },
    Published { resource_id: Uuid },
    PublishFailed { message: String },
    BannerDismissed,
    Navigated { route: Route },
    /// Cierre por descarte explícito.
    Discarded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowEvent {
    pub seq: u64, // asignado por el store (orden append)
    pub session_id: Uuid,
    pub kind: WorkflowEventKind,
    pub ts: DateTime<Utc>,
}
