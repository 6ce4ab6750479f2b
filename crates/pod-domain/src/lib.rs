//! pod-domain: workflows concretos del dashboard de creadores y catálogo de
//! podcasts/episodios.
pub mod catalog;
pub mod error;
pub mod fields;
pub mod workflows;

pub use catalog::{CatalogRepository, Episode, EpisodeQuery, EpisodeStatus, InMemoryCatalog, Podcast, SortDirection,
                  SortKey};
pub use error::CatalogError;
pub use workflows::{episode_upload, podcast_editor, profile_editor};
