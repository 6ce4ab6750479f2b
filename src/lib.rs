//! podflow
//!
//! Este crate actúa como la librería de aplicación de podflow:
//! - Expone `config` para cargar la configuración desde el entorno.
//! - Expone `errors` para manejar errores de núcleo y dominio.
//! - Expone `demo` con una sesión guionada del wizard de episodios.
//!
//! El motor vive en `pod-core`, los workflows en `pod-domain` y los
//! servicios simulados en `pod-adapters`.

pub mod config;
pub mod demo;
pub mod errors;

pub use config::{AppConfig, CONFIG};
pub use errors::{core_error::CoreError, domain_error::DomainError};
