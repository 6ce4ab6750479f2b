use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use log::debug;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::model::{Episode, EpisodeStatus, Podcast};
use super::query::EpisodeQuery;
use crate::error::CatalogError;

/// Acceso al catálogo de podcasts y episodios.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_podcasts(&self) -> Vec<Podcast>;
    async fn get_podcast(&self, id: Uuid) -> Result<Podcast, CatalogError>;
    /// Inserta o reemplaza por id.
    async fn upsert_podcast(&self, podcast: Podcast) -> Result<(), CatalogError>;
    async fn list_episodes(&self, query: &EpisodeQuery) -> Vec<Episode>;
    async fn get_episode(&self, id: Uuid) -> Result<Episode, CatalogError>;
    /// Falla si el podcast dueño no existe.
    async fn insert_episode(&self, episode: Episode) -> Result<(), CatalogError>;
    async fn update_episode(&self, episode: Episode) -> Result<(), CatalogError>;
}

#[derive(Default)]
struct CatalogState {
    podcasts: HashMap<Uuid, Podcast>,
    // Orden de inserción: es el orden base de la tabla antes de ordenar.
    episodes: Vec<Episode>,
}

/// Catálogo en memoria; clonable y compartido entre adaptadores.
#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    state: Arc<RwLock<CatalogState>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catálogo con un podcast y tres episodios de ejemplo. Devuelve el id del
    /// podcast sembrado.
    pub fn seeded() -> (Self, Uuid) {
        let now = Utc::now();
        let podcast_id = Uuid::new_v4();
        let podcast = Podcast { id: podcast_id,
                                title: "The Rust Hour".into(),
                                description: "Weekly conversations about systems programming.".into(),
                                author: "Rust Hour Team".into(),
                                category: "Technology".into(),
                                language: "en".into(),
                                website_url: Some("https://rusthour.example.com".into()),
                                explicit: false,
                                artwork: None,
                                created_at: now - Duration::days(120),
                                updated_at: now - Duration::days(3) };
        let episode = |n: u32, title: &str, status: EpisodeStatus, days_ago: Option<i64>, minutes: u64, plays: u64,
                       tags: &[&str]| Episode { id: Uuid::new_v4(),
                                                podcast_id,
                                                title: title.to_string(),
                                                description: format!("Episode {n} of The Rust Hour."),
                                                episode_number: Some(n),
                                                season_number: Some(1),
                                                status,
                                                duration_ms: minutes * 60_000,
                                                plays,
                                                tags: tags.iter().map(|t| t.to_string()).collect(),
                                                explicit: false,
                                                audio: None,
                                                cover_image: None,
                                                transcript: None,
                                                show_notes: String::new(),
                                                published_at: days_ago.map(|d| now - Duration::days(d)),
                                                updated_at: now };
        let episodes = vec![episode(1, "Ownership Explained", EpisodeStatus::Published, Some(21), 42, 1_830,
                                    &["ownership", "basics"]),
                            episode(2, "Async in Practice", EpisodeStatus::Published, Some(14), 55, 2_410,
                                    &["async", "tokio"]),
                            episode(3, "Unsafe Without Fear", EpisodeStatus::Draft, None, 38, 0, &["unsafe"])];
        let mut podcasts = HashMap::new();
        podcasts.insert(podcast_id, podcast);
        let catalog = Self { state: Arc::new(RwLock::new(CatalogState { podcasts, episodes })) };
        (catalog, podcast_id)
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalog {
    async fn list_podcasts(&self) -> Vec<Podcast> {
        let guard = self.state.read().await;
        let mut out: Vec<Podcast> = guard.podcasts.values().cloned().collect();
        out.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
        out
    }

    async fn get_podcast(&self, id: Uuid) -> Result<Podcast, CatalogError> {
        self.state.read().await.podcasts.get(&id).cloned().ok_or(CatalogError::PodcastNotFound(id))
    }

    async fn upsert_podcast(&self, podcast: Podcast) -> Result<(), CatalogError> {
        debug!("catalog: upsert podcast {}", podcast.id);
        self.state.write().await.podcasts.insert(podcast.id, podcast);
        Ok(())
    }

    async fn list_episodes(&self, query: &EpisodeQuery) -> Vec<Episode> {
        let guard = self.state.read().await;
        query.apply(guard.episodes.iter().cloned())
    }

    async fn get_episode(&self, id: Uuid) -> Result<Episode, CatalogError> {
        self.state
            .read()
            .await
            .episodes
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or(CatalogError::EpisodeNotFound(id))
    }

    async fn insert_episode(&self, episode: Episode) -> Result<(), CatalogError> {
        let mut guard = self.state.write().await;
        if !guard.podcasts.contains_key(&episode.podcast_id) {
            return Err(CatalogError::PodcastNotFound(episode.podcast_id));
        }
        debug!("catalog: insert episode {} into podcast {}", episode.id, episode.podcast_id);
        guard.episodes.push(episode);
        Ok(())
    }

    async fn update_episode(&self, episode: Episode) -> Result<(), CatalogError> {
        let mut guard = self.state.write().await;
        let slot = guard.episodes
                        .iter_mut()
                        .find(|e| e.id == episode.id)
                        .ok_or(CatalogError::EpisodeNotFound(episode.id))?;
        *slot = episode;
        Ok(())
    }
}
