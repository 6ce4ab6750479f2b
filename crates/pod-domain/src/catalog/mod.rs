//! Catálogo de podcasts y episodios de la consola de gestión.
//!
//! Reemplaza el objeto de datos mock compartido por un repositorio inyectable;
//! los publicadores escriben aquí y la consola lista con filtros y orden.
mod model;
mod query;
mod repository;

pub use model::{Episode, EpisodeStatus, Podcast};
pub use query::{EpisodeQuery, SortDirection, SortKey};
pub use repository::{CatalogRepository, InMemoryCatalog};
