//! Workflows concretos del dashboard: definiciones (pasos, campos, reglas,
//! rutas) que se entregan al motor de `pod-core`.
mod episode_upload;
mod podcast_editor;
mod profile_editor;
pub mod routes;

pub use episode_upload::episode_upload;
pub use podcast_editor::{podcast_editor, CATEGORIES, LANGUAGES};
pub use profile_editor::profile_editor;
