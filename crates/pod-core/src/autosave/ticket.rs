use uuid::Uuid;

use crate::model::FormSnapshot;

/// Guardado de borrador en curso: copia del snapshot y revisión del store al
/// momento de iniciar. Si el store avanzó cuando el guardado termina, el
/// estado queda en `Unsaved`.
#[derive(Debug, Clone)]
pub struct DraftTicket {
    pub session_id: Uuid,
    pub revision: u64,
    pub snapshot: FormSnapshot,
}
