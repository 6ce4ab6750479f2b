use chrono::{DateTime, Utc};
use pod_core::{AttachmentDescriptor, FormSnapshot};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CatalogError;
use crate::fields;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpisodeStatus {
    Draft,
    Scheduled,
    Published,
}

impl EpisodeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EpisodeStatus::Draft => "draft",
            EpisodeStatus::Scheduled => "scheduled",
            EpisodeStatus::Published => "published",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Podcast {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub author: String,
    pub category: String,
    pub language: String,
    pub website_url: Option<String>,
    pub explicit: bool,
    pub artwork: Option<AttachmentDescriptor>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub id: Uuid,
    pub podcast_id: Uuid,
    pub title: String,
    pub description: String,
    pub episode_number: Option<u32>,
    pub season_number: Option<u32>,
    pub status: EpisodeStatus,
    pub duration_ms: u64,
    pub plays: u64,
    pub tags: Vec<String>,
    pub explicit: bool,
    pub audio: Option<AttachmentDescriptor>,
    pub cover_image: Option<AttachmentDescriptor>,
    pub transcript: Option<AttachmentDescriptor>,
    pub show_notes: String,
    pub published_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

fn optional_number(snapshot: &FormSnapshot, field: &str) -> Result<Option<u32>, CatalogError> {
    let raw = snapshot.text(field).trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<u32>()
       .map(Some)
       .map_err(|_| CatalogError::InvalidSnapshot(format!("'{field}' is not a number: {raw}")))
}

fn optional_text(snapshot: &FormSnapshot, field: &str) -> Option<String> {
    let raw = snapshot.text(field).trim();
    (!raw.is_empty()).then(|| raw.to_string())
}

impl Episode {
    /// Construye un episodio a partir del snapshot del wizard de subida.
    ///
    /// El snapshot ya pasó la validación agregada; aquí sólo se convierten
    /// tipos. La visibilidad `private` deja el episodio como borrador.
    pub fn from_snapshot(id: Uuid, podcast_id: Uuid, snapshot: &FormSnapshot, now: DateTime<Utc>)
                         -> Result<Self, CatalogError> {
        let title = snapshot.text(fields::TITLE).trim().to_string();
        if title.is_empty() {
            return Err(CatalogError::InvalidSnapshot("episode title is empty".into()));
        }
        let audio = snapshot.attachment(fields::AUDIO_FILE).cloned();
        let duration_ms = audio.as_ref().and_then(|a| a.metadata.duration_ms).unwrap_or(0);
        let status = match snapshot.text(fields::VISIBILITY) {
            "private" => EpisodeStatus::Draft,
            _ => EpisodeStatus::Published,
        };
        Ok(Self { id,
                  podcast_id,
                  title,
                  description: snapshot.text(fields::DESCRIPTION).trim().to_string(),
                  episode_number: optional_number(snapshot, fields::EPISODE_NUMBER)?,
                  season_number: optional_number(snapshot, fields::SEASON_NUMBER)?,
                  status,
                  duration_ms,
                  plays: 0,
                  tags: snapshot.list(fields::TAGS).to_vec(),
                  explicit: snapshot.flag(fields::EXPLICIT),
                  audio,
                  cover_image: snapshot.attachment(fields::COVER_IMAGE).cloned(),
                  transcript: snapshot.attachment(fields::TRANSCRIPT).cloned(),
                  show_notes: snapshot.text(fields::SHOW_NOTES).to_string(),
                  published_at: (status == EpisodeStatus::Published).then_some(now),
                  updated_at: now })
    }
}

impl Podcast {
    /// Construye (o reemplaza) un podcast desde el snapshot del editor.
    pub fn from_snapshot(id: Uuid, snapshot: &FormSnapshot, created_at: DateTime<Utc>, now: DateTime<Utc>)
                         -> Result<Self, CatalogError> {
        let title = snapshot.text(fields::TITLE).trim().to_string();
        if title.is_empty() {
            return Err(CatalogError::InvalidSnapshot("podcast title is empty".into()));
        }
        Ok(Self { id,
                  title,
                  description: snapshot.text(fields::DESCRIPTION).trim().to_string(),
                  author: snapshot.text(fields::AUTHOR).trim().to_string(),
                  category: snapshot.text(fields::CATEGORY).to_string(),
                  language: snapshot.text(fields::LANGUAGE).to_string(),
                  website_url: optional_text(snapshot, fields::WEBSITE_URL),
                  explicit: snapshot.flag(fields::EXPLICIT),
                  artwork: snapshot.attachment(fields::ARTWORK).cloned(),
                  created_at,
                  updated_at: now })
    }
}
