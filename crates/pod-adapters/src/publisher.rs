//! Servicios de publicación simulados: escriben el snapshot final en el
//! catálogo (episodios, podcasts) o en el registro de perfil.
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use log::{info, warn};
use pod_core::{AttachmentDescriptor, FormSnapshot, PublishReceipt, Publisher, ServiceError};
use pod_domain::fields;
use pod_domain::{CatalogError, CatalogRepository, Episode, InMemoryCatalog, Podcast};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::latency::Latency;

fn to_service(e: CatalogError) -> ServiceError {
    ServiceError::Rejected(e.to_string())
}

/// Fallos inyectados: las próximas `n` llamadas devuelven `Unavailable`.
#[derive(Debug, Default)]
struct FailureBudget(AtomicUsize);

impl FailureBudget {
    fn set(&self, n: usize) {
        self.0.store(n, Ordering::SeqCst);
    }

    fn take(&self) -> bool {
        self.0.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1)).is_ok()
    }
}

/// Publica el wizard de subida como episodio nuevo del podcast indicado en
/// `podcastId`.
pub struct EpisodePublisher {
    catalog: InMemoryCatalog,
    latency: Latency,
    failures: FailureBudget,
}

impl EpisodePublisher {
    pub fn new(catalog: InMemoryCatalog, latency: Latency) -> Self {
        Self { catalog,
               latency,
               failures: FailureBudget::default() }
    }

    pub fn fail_next(&self, n: usize) {
        self.failures.set(n);
    }
}

#[async_trait]
impl Publisher for EpisodePublisher {
    async fn publish(&self, session_id: Uuid, snapshot: &FormSnapshot) -> Result<PublishReceipt, ServiceError> {
        self.latency.wait().await;
        if self.failures.take() {
            warn!("episode publish for session {session_id} failed (injected)");
            return Err(ServiceError::Unavailable("episode service unavailable".into()));
        }
        let raw = snapshot.text(fields::PODCAST_ID);
        let podcast_id = Uuid::parse_str(raw.trim()).map_err(|_| {
                                                         ServiceError::Rejected(format!("invalid podcast id '{raw}'"))
                                                     })?;
        let now = Utc::now();
        let episode = Episode::from_snapshot(Uuid::new_v4(), podcast_id, snapshot, now).map_err(to_service)?;
        let id = episode.id;
        self.catalog.insert_episode(episode).await.map_err(to_service)?;
        info!("episode {id} published into podcast {podcast_id}");
        Ok(PublishReceipt { resource_id: id,
                            published_at: now })
    }
}

/// Crea o actualiza un podcast desde el editor.
pub struct PodcastPublisher {
    catalog: InMemoryCatalog,
    latency: Latency,
    editing: Option<Uuid>,
}

impl PodcastPublisher {
    pub fn new(catalog: InMemoryCatalog, latency: Latency) -> Self {
        Self { catalog,
               latency,
               editing: None }
    }

    /// Publicar reemplaza el podcast `id` conservando su fecha de creación.
    pub fn editing(mut self, id: Uuid) -> Self {
        self.editing = Some(id);
        self
    }
}

#[async_trait]
impl Publisher for PodcastPublisher {
    async fn publish(&self, _session_id: Uuid, snapshot: &FormSnapshot) -> Result<PublishReceipt, ServiceError> {
        self.latency.wait().await;
        let now = Utc::now();
        let (id, created_at) = match self.editing {
            Some(id) => (id, self.catalog.get_podcast(id).await.map_err(to_service)?.created_at),
            None => (Uuid::new_v4(), now),
        };
        let podcast = Podcast::from_snapshot(id, snapshot, created_at, now).map_err(to_service)?;
        self.catalog.upsert_podcast(podcast).await.map_err(to_service)?;
        info!("podcast {id} saved");
        Ok(PublishReceipt { resource_id: id,
                            published_at: now })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub id: Uuid,
    pub display_name: String,
    pub tagline: String,
    pub bio: String,
    pub avatar: Option<AttachmentDescriptor>,
    /// (red, url) sólo para enlaces no vacíos.
    pub links: Vec<(String, String)>,
}

/// Guarda el perfil del creador.
pub struct ProfilePublisher {
    id: Uuid,
    latency: Latency,
    current: RwLock<Option<ProfileRecord>>,
}

impl ProfilePublisher {
    pub fn new(latency: Latency) -> Self {
        Self { id: Uuid::new_v4(),
               latency,
               current: RwLock::new(None) }
    }

    pub async fn current(&self) -> Option<ProfileRecord> {
        self.current.read().await.clone()
    }
}

#[async_trait]
impl Publisher for ProfilePublisher {
    async fn publish(&self, _session_id: Uuid, snapshot: &FormSnapshot) -> Result<PublishReceipt, ServiceError> {
        self.latency.wait().await;
        let links = [("website", fields::WEBSITE_URL),
                     ("twitter", fields::TWITTER_URL),
                     ("instagram", fields::INSTAGRAM_URL),
                     ("youtube", fields::YOUTUBE_URL)].into_iter()
                                                      .filter_map(|(name, field)| {
                                                          let url = snapshot.text(field).trim();
                                                          (!url.is_empty()).then(|| (name.to_string(), url.to_string()))
                                                      })
                                                      .collect();
        let record = ProfileRecord { id: self.id,
                                     display_name: snapshot.text(fields::DISPLAY_NAME).trim().to_string(),
                                     tagline: snapshot.text(fields::TAGLINE).trim().to_string(),
                                     bio: snapshot.text(fields::BIO).to_string(),
                                     avatar: snapshot.attachment(fields::AVATAR).cloned(),
                                     links };
        *self.current.write().await = Some(record);
        info!("profile {} updated", self.id);
        Ok(PublishReceipt { resource_id: self.id,
                            published_at: Utc::now() })
    }
}
