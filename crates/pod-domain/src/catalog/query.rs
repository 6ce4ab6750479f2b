use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::{Episode, EpisodeStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Title,
    #[default]
    PublishedAt,
    Duration,
    Plays,
    EpisodeNumber,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Filtro + orden de la tabla de episodios.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeQuery {
    pub podcast_id: Option<Uuid>,
    pub status: Option<EpisodeStatus>,
    /// Búsqueda case-insensitive sobre título, descripción y tags.
    pub search: Option<String>,
    pub sort: SortKey,
    pub direction: SortDirection,
}

impl EpisodeQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn podcast(mut self, id: Uuid) -> Self {
        self.podcast_id = Some(id);
        self
    }

    pub fn status(mut self, status: EpisodeStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn sort_by(mut self, key: SortKey, direction: SortDirection) -> Self {
        self.sort = key;
        self.direction = direction;
        self
    }

    /// Clic en una cabecera: misma columna invierte la dirección, otra
    /// columna arranca descendente.
    pub fn toggle_sort(&mut self, key: SortKey) {
        if self.sort == key {
            self.direction = self.direction.toggled();
        } else {
            self.sort = key;
            self.direction = SortDirection::Desc;
        }
    }

    pub fn matches(&self, episode: &Episode) -> bool {
        if self.podcast_id.is_some_and(|p| p != episode.podcast_id) {
            return false;
        }
        if self.status.is_some_and(|s| s != episode.status) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                episode.title.to_lowercase().contains(&term)
                || episode.description.to_lowercase().contains(&term)
                || episode.tags.iter().any(|t| t.to_lowercase().contains(&term))
            }
        }
    }

    /// Filtra y ordena. El orden es estable; empates conservan el orden de
    /// entrada.
    pub fn apply(&self, episodes: impl IntoIterator<Item = Episode>) -> Vec<Episode> {
        let mut out: Vec<Episode> = episodes.into_iter().filter(|e| self.matches(e)).collect();
        out.sort_by(|a, b| {
               let ord = match self.sort {
                   SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
                   // Sin fecha (borradores) quedan al final en orden descendente.
                   SortKey::PublishedAt => a.published_at.cmp(&b.published_at),
                   SortKey::Duration => a.duration_ms.cmp(&b.duration_ms),
                   SortKey::Plays => a.plays.cmp(&b.plays),
                   SortKey::EpisodeNumber => a.episode_number.cmp(&b.episode_number),
               };
               match self.direction {
                   SortDirection::Asc => ord,
                   SortDirection::Desc => ord.reverse(),
               }
           });
        out
    }
}
