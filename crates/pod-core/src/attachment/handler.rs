//! Staging de adjuntos en dos fases.
//!
//! `begin` valida de forma síncrona y emite un ticket con un token
//! monótonamente creciente para el campo. El sondeo de metadatos es
//! asíncrono; al terminar, `settle` sólo produce el descriptor si el token
//! del ticket sigue siendo el vigente. Un callback viejo que termina después
//! de que se preparó otro adjunto en el mismo campo se descarta.
use std::collections::HashMap;

use log::debug;

use super::AttachmentPolicies;
use crate::errors::AttachmentError;
use crate::model::{AttachmentDescriptor, AttachmentKind, AttachmentMetadata, AttachmentUpload};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagingTicket {
    pub field: String,
    pub kind: AttachmentKind,
    pub token: u64,
    pub upload: AttachmentUpload,
}

#[derive(Debug, Clone, Default)]
pub struct AttachmentHandler {
    policies: AttachmentPolicies,
    current: HashMap<String, u64>,
    next_token: u64,
}

impl AttachmentHandler {
    pub fn new(policies: AttachmentPolicies) -> Self {
        Self { policies,
               current: HashMap::new(),
               next_token: 0 }
    }

    pub fn policies(&self) -> &AttachmentPolicies {
        &self.policies
    }

    /// Valida tipo y tamaño. Un rechazo no altera los tickets en vuelo.
    pub fn begin(&mut self,
                 field: &str,
                 kind: AttachmentKind,
                 upload: AttachmentUpload)
                 -> Result<StagingTicket, AttachmentError> {
        self.policies.get(kind).check(&upload)?;
        self.next_token += 1;
        let token = self.next_token;
        self.current.insert(field.to_string(), token);
        debug!("attachment '{field}': staging '{}' (token {token})", upload.file_name);
        Ok(StagingTicket { field: field.to_string(),
                           kind,
                           token,
                           upload })
    }

    pub fn is_current(&self, ticket: &StagingTicket) -> bool {
        self.current.get(&ticket.field) == Some(&ticket.token)
    }

    pub fn in_flight(&self, field: &str) -> bool {
        self.current.contains_key(field)
    }

    /// Cierra un ticket con los metadatos sondeados. `None` si el ticket quedó
    /// obsoleto.
    pub fn settle(&mut self, ticket: StagingTicket, metadata: AttachmentMetadata) -> Option<AttachmentDescriptor> {
        if !self.is_current(&ticket) {
            debug!("attachment '{}': discarding stale token {}", ticket.field, ticket.token);
            return None;
        }
        self.current.remove(&ticket.field);
        Some(AttachmentDescriptor::from_upload(ticket.kind, ticket.upload, metadata))
    }

    /// Cierra un ticket cuyo sondeo falló. Devuelve si el ticket era vigente
    /// (sólo entonces corresponde reportar el error).
    pub fn abandon(&mut self, ticket: &StagingTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.current.remove(&ticket.field);
        true
    }

    /// Invalida cualquier ticket en vuelo del campo (remoción explícita).
    pub fn invalidate(&mut self, field: &str) {
        self.current.remove(field);
    }
}
