use thiserror::Error;
use uuid::Uuid;

/// Errores del catálogo y de la conversión de formularios a registros.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CatalogError {
    #[error("podcast not found: {0}")]
    PodcastNotFound(Uuid),
    #[error("episode not found: {0}")]
    EpisodeNotFound(Uuid),
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}
