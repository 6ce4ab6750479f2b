//! Errores del core.
//!
//! `WorkflowError` es el error de las operaciones de sesión; ninguna variante
//! es fatal: el peor caso es que el usuario repita la acción.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::AttachmentKind;
use crate::validation::FieldErrors;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum WorkflowError {
    #[error("unknown step '{0}'")]
    UnknownStep(String),
    #[error("no step after '{0}'")]
    NoNextStep(String),
    #[error("no step before '{0}'")]
    NoPreviousStep(String),
    #[error("step '{step}' blocked by {} invalid field(s)", .errors.len())]
    StepBlocked { step: String, errors: FieldErrors },
    #[error("submit blocked by {} invalid field(s)", .errors.len())]
    SubmitBlocked { errors: FieldErrors },
    #[error("session already closed")]
    SessionClosed,
    #[error("field '{0}' only accepts staged attachments")]
    AttachmentSlot(String),
    #[error("field '{0}' is not an attachment slot")]
    NotAnAttachmentSlot(String),
    #[error("value does not match the declared type of field '{0}'")]
    TypeMismatch(String),
    #[error("field '{0}' is not a list")]
    NotAList(String),
    #[error("attachment rejected for '{field}': {source}")]
    Attachment { field: String, source: AttachmentError },
    #[error("draft save failed: {0}")]
    Persistence(ServiceError),
    #[error("publish failed: {0}")]
    Publish(ServiceError),
    #[error("invalid workflow definition: {0}")]
    InvalidDefinition(String),
}

/// Rechazo de un adjunto antes de entrar al Field Store.
#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum AttachmentError {
    #[error("unsupported file type '{mime}' for {kind}")]
    UnsupportedType { mime: String, kind: AttachmentKind },
    #[error("file is too large ({size} bytes, max {max} bytes)")]
    TooLarge { size: u64, max: u64 },
    #[error("file is empty")]
    EmptyFile,
    #[error("could not read file metadata: {0}")]
    ProbeFailed(String),
}

/// Errores reportados por los colaboradores externos (draft store, publish,
/// probe).
#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum ServiceError {
    #[error("service unavailable: {0}")]
    Unavailable(String),
    #[error("rejected by service: {0}")]
    Rejected(String),
    #[error("service timed out")]
    Timeout,
}
