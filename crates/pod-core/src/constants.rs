//! Constantes del motor de formularios.
//!
//! Los límites de adjuntos y el retardo del autosave son los valores por
//! defecto; `WorkflowSettings` permite sobreescribirlos por sesión.

/// Un megabyte (binario), unidad usada por los límites de tamaño.
pub const MB: u64 = 1024 * 1024;

/// Retardo por defecto del autosave (last-mutation-wins).
pub const DEFAULT_AUTOSAVE_DELAY_MS: u64 = 2_000;

/// Techo de tamaño para audio.
pub const MAX_AUDIO_BYTES: u64 = 200 * MB;
/// Techo de tamaño para imágenes (portadas, avatares).
pub const MAX_IMAGE_BYTES: u64 = 5 * MB;
/// Techo de tamaño para transcripciones.
pub const MAX_TRANSCRIPT_BYTES: u64 = 10 * MB;

/// Mensaje de banner cuando el submit queda bloqueado por validación.
pub const SUBMIT_BLOCKED_MESSAGE: &str = "Please fix the highlighted fields before publishing.";

/// Retardo por defecto de los colaboradores simulados.
pub const DEFAULT_SIMULATED_LATENCY_MS: u64 = 300;
