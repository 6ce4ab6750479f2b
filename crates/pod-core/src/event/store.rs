use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::broadcast;
use uuid::Uuid;

use super::{WorkflowEvent, WorkflowEventKind};

/// Almacenamiento de eventos append-only.
pub trait EventStore {
    /// Agrega un evento a partir de su kind y devuelve el evento completo (con seq y ts).
    fn append_kind(&mut self, session_id: Uuid, kind: WorkflowEventKind) -> WorkflowEvent;
    /// Lista eventos de una sesión (orden ascendente por seq).
    fn list(&self, session_id: Uuid) -> Vec<WorkflowEvent>;
}

#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    pub inner: HashMap<Uuid, Vec<WorkflowEvent>>,
}

impl EventStore for InMemoryEventStore {
    fn append_kind(&mut self, session_id: Uuid, kind: WorkflowEventKind) -> WorkflowEvent {
        let vec = self.inner.entry(session_id).or_default();
        let seq = vec.len() as u64;
        let ev = WorkflowEvent { seq,
                                 session_id,
                                 kind,
                                 ts: Utc::now() };
        vec.push(ev.clone());
        ev
    }

    fn list(&self, session_id: Uuid) -> Vec<WorkflowEvent> {
        self.inner.get(&session_id).cloned().unwrap_or_default()
    }
}

/// Store en memoria que además difunde cada evento a los suscriptores (capa
/// de presentación). Un suscriptor lento pierde eventos (`Lagged`) pero el log
/// completo sigue disponible vía `list`.
#[derive(Debug)]
pub struct BroadcastEventStore {
    log: InMemoryEventStore,
    tx: broadcast::Sender<WorkflowEvent>,
}

impl BroadcastEventStore {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { log: InMemoryEventStore::default(),
               tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WorkflowEvent> {
        self.tx.subscribe()
    }
}

impl Default for BroadcastEventStore {
    fn default() -> Self {
        Self::new(256)
    }
}

impl EventStore for BroadcastEventStore {
    fn append_kind(&mut self, session_id: Uuid, kind: WorkflowEventKind) -> WorkflowEvent {
        let ev = self.log.append_kind(session_id, kind);
        // Sin suscriptores `send` falla; el log ya tiene el evento.
        let _ = self.tx.send(ev.clone());
        ev
    }

    fn list(&self, session_id: Uuid) -> Vec<WorkflowEvent> {
        self.log.list(session_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_assigns_sequential_seq() {
        let mut store = InMemoryEventStore::default();
        let id = Uuid::new_v4();
        let a = store.append_kind(id, WorkflowEventKind::Discarded);
        let b = store.append_kind(id, WorkflowEventKind::BannerDismissed);
        assert_eq!((a.seq, b.seq), (0, 1));
        assert_eq!(store.list(id).len(), 2);
        assert!(store.list(Uuid::new_v4()).is_empty());
    }

    #[tokio::test]
    async fn broadcast_delivers_to_subscribers() {
        let mut store = BroadcastEventStore::default();
        let mut rx = store.subscribe();
        let id = Uuid::new_v4();
        store.append_kind(id, WorkflowEventKind::Discarded);
        let ev = rx.recv().await.expect("event delivered");
        assert_eq!(ev.kind, WorkflowEventKind::Discarded);
        assert_eq!(store.list(id).len(), 1);
    }
}
