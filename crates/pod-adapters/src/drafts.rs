use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::info;
use pod_core::{DraftStore, FormSnapshot, ServiceError};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::latency::Latency;

#[derive(Debug, Clone, PartialEq)]
pub struct StoredDraft {
    pub snapshot: FormSnapshot,
    pub saved_at: DateTime<Utc>,
    /// Veces que se guardó este borrador.
    pub saves: u32,
}

/// Borradores por sesión; cada guardado reemplaza al anterior.
#[derive(Clone)]
pub struct InMemoryDraftStore {
    drafts: Arc<RwLock<HashMap<Uuid, StoredDraft>>>,
    latency: Latency,
    offline: Arc<std::sync::atomic::AtomicBool>,
}

impl InMemoryDraftStore {
    pub fn new(latency: Latency) -> Self {
        Self { drafts: Arc::new(RwLock::new(HashMap::new())),
               latency,
               offline: Arc::new(std::sync::atomic::AtomicBool::new(false)) }
    }

    /// Simula una caída del backend: los guardados fallan mientras esté activo.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, std::sync::atomic::Ordering::SeqCst);
    }

    pub async fn load_draft(&self, session_id: Uuid) -> Option<StoredDraft> {
        self.drafts.read().await.get(&session_id).cloned()
    }

    pub async fn discard_draft(&self, session_id: Uuid) -> bool {
        self.drafts.write().await.remove(&session_id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.drafts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.drafts.read().await.is_empty()
    }
}

#[async_trait]
impl DraftStore for InMemoryDraftStore {
    async fn save_draft(&self, session_id: Uuid, snapshot: &FormSnapshot) -> Result<(), ServiceError> {
        self.latency.wait().await;
        if self.offline.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(ServiceError::Unavailable("draft storage is offline".into()));
        }
        let mut guard = self.drafts.write().await;
        let saves = guard.get(&session_id).map_or(0, |d| d.saves) + 1;
        guard.insert(session_id,
                     StoredDraft { snapshot: snapshot.clone(),
                                   saved_at: Utc::now(),
                                   saves });
        info!("draft {session_id} saved ({} fields, save #{saves})", snapshot.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pod_core::FieldValue;

    use super::*;

    #[tokio::test]
    async fn later_save_replaces_earlier_one() {
        let store = InMemoryDraftStore::new(Latency::none());
        let id = Uuid::new_v4();
        let first: FormSnapshot = [("title".to_string(), FieldValue::from("a"))].into_iter().collect();
        let second: FormSnapshot = [("title".to_string(), FieldValue::from("ab"))].into_iter().collect();
        store.save_draft(id, &first).await.unwrap();
        store.save_draft(id, &second).await.unwrap();
        let draft = store.load_draft(id).await.unwrap();
        assert_eq!(draft.snapshot, second);
        assert_eq!(draft.saves, 2);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn offline_store_reports_unavailable() {
        let store = InMemoryDraftStore::new(Latency::none());
        store.set_offline(true);
        let res = store.save_draft(Uuid::new_v4(), &FormSnapshot::new()).await;
        assert!(matches!(res, Err(ServiceError::Unavailable(_))));
        assert!(store.is_empty().await);
    }
}
