use serde::{Deserialize, Serialize};

/// Estado de guardado del borrador.
///
/// Transiciones:
/// - cualquier mutación -> `Unsaved`
/// - `Unsaved` -> `Saving` (expira el debounce o guardado manual)
/// - `Saving` -> `Saved` (el colaborador confirmó y nada cambió mientras tanto)
/// - `Saving` -> `Unsaved` (falló el guardado o hubo mutaciones durante el mismo)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveStatus {
    Saved,
    Saving,
    Unsaved,
}
