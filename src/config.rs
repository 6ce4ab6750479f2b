//! Configuración central de podflow.
//! Carga variables de entorno (.env) una sola vez y expone una estructura
//! inmutable (`CONFIG`) que se convierte en `WorkflowSettings` y en la
//! latencia de los servicios simulados.
use std::env;
use std::time::Duration;

use dotenvy::dotenv;
use log::warn;
use once_cell::sync::Lazy;
use pod_adapters::Latency;
use pod_core::constants::{DEFAULT_AUTOSAVE_DELAY_MS, DEFAULT_SIMULATED_LATENCY_MS, MAX_AUDIO_BYTES, MAX_IMAGE_BYTES,
                          MAX_TRANSCRIPT_BYTES};
use pod_core::{AttachmentKind, AttachmentPolicies, WorkflowSettings};
use serde::Serialize;

use crate::errors::core_error::CoreError;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppConfig {
    /// Retardo del autosave (debounce).
    pub autosave_delay_ms: u64,
    pub max_audio_bytes: u64,
    pub max_image_bytes: u64,
    pub max_transcript_bytes: u64,
    /// Latencia artificial de los colaboradores en memoria.
    pub simulated_latency_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { autosave_delay_ms: DEFAULT_AUTOSAVE_DELAY_MS,
               max_audio_bytes: MAX_AUDIO_BYTES,
               max_image_bytes: MAX_IMAGE_BYTES,
               max_transcript_bytes: MAX_TRANSCRIPT_BYTES,
               simulated_latency_ms: DEFAULT_SIMULATED_LATENCY_MS }
    }
}

fn parse_u64(key: &str, raw: Option<String>, default: u64) -> Result<u64, CoreError> {
    match raw {
        None => Ok(default),
        Some(v) => v.trim()
                    .parse()
                    .map_err(|_| CoreError::Config(format!("{key} debe ser un entero sin signo, se obtuvo '{v}'"))),
    }
}

impl AppConfig {
    /// Lee `PODFLOW_*` del entorno (tras cargar `.env`). Claves ausentes
    /// toman el valor por defecto; valores no numéricos son error.
    pub fn from_env() -> Result<Self, CoreError> {
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero con una fuente de claves arbitraria.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CoreError> {
        let d = Self::default();
        let get = |key: &str, default: u64| parse_u64(key, lookup(key), default);
        let cfg = Self { autosave_delay_ms: get("PODFLOW_AUTOSAVE_DELAY_MS", d.autosave_delay_ms)?,
                         max_audio_bytes: get("PODFLOW_MAX_AUDIO_BYTES", d.max_audio_bytes)?,
                         max_image_bytes: get("PODFLOW_MAX_IMAGE_BYTES", d.max_image_bytes)?,
                         max_transcript_bytes: get("PODFLOW_MAX_TRANSCRIPT_BYTES", d.max_transcript_bytes)?,
                         simulated_latency_ms: get("PODFLOW_SIMULATED_LATENCY_MS", d.simulated_latency_ms)? };
        if cfg.autosave_delay_ms == 0 {
            return Err(CoreError::Config("PODFLOW_AUTOSAVE_DELAY_MS debe ser mayor que 0".into()));
        }
        Ok(cfg)
    }

    pub fn workflow_settings(&self) -> WorkflowSettings {
        let policies = AttachmentPolicies::default().with_max_bytes(AttachmentKind::Audio, self.max_audio_bytes)
                                                    .with_max_bytes(AttachmentKind::Image, self.max_image_bytes)
                                                    .with_max_bytes(AttachmentKind::Transcript,
                                                                    self.max_transcript_bytes);
        WorkflowSettings { autosave_delay: Duration::from_millis(self.autosave_delay_ms),
                           policies }
    }

    pub fn latency(&self) -> Latency {
        Latency::new(Duration::from_millis(self.simulated_latency_ms))
    }
}

/// Instancia global perezosa de configuración, evaluada una sola vez. Una
/// configuración inválida cae a los valores por defecto con un aviso.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(|| {
    AppConfig::from_env().unwrap_or_else(|e| {
                             warn!("{e}; usando configuración por defecto");
                             AppConfig::default()
                         })
});
