//! Field Store: contenedor clave/valor de los inputs actuales.
//!
//! Single-writer y síncrono. Cada mutación incrementa `revision` y marca el
//! borrador como `Unsaved`; no tiene otros efectos (el rearmado del timer y la
//! emisión de eventos los hace la sesión).
use indexmap::IndexMap;
use log::debug;

use super::SaveStatus;
use crate::model::{FieldKind, FieldValue, FormSnapshot};

#[derive(Debug, Clone)]
pub struct FieldStore {
    snapshot: FormSnapshot,
    declared: IndexMap<String, FieldKind>,
    status: SaveStatus,
    revision: u64,
}

impl FieldStore {
    /// Crea el store sembrando cada campo declarado con su valor por defecto.
    /// Un store recién sembrado se considera guardado (no hay nada que
    /// persistir todavía).
    pub fn new(declared: IndexMap<String, FieldKind>) -> Self {
        let snapshot = declared.iter()
                               .map(|(name, kind)| (name.clone(), kind.default_value()))
                               .collect();
        Self { snapshot,
               declared,
               status: SaveStatus::Saved,
               revision: 0 }
    }

    pub fn snapshot(&self) -> &FormSnapshot {
        &self.snapshot
    }

    pub fn status(&self) -> SaveStatus {
        self.status
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn kind_of(&self, field: &str) -> Option<FieldKind> {
        self.declared.get(field).copied()
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.snapshot.get(field)
    }

    /// Valor actual o el default tipado del campo declarado (`Empty` si el
    /// campo no existe).
    pub fn get_or_default(&self, field: &str) -> FieldValue {
        match self.snapshot.get(field) {
            Some(v) => v.clone(),
            None => self.declared.get(field).map(FieldKind::default_value).unwrap_or_default(),
        }
    }

    /// Reemplaza el valor incondicionalmente.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        let field = field.into();
        debug!("field store: set '{field}'");
        self.snapshot.insert(field, value.into());
        self.touch();
    }

    /// Limpia un campo: los declarados vuelven a su default (la clave se
    /// conserva), los no declarados desaparecen.
    pub fn remove(&mut self, field: &str) {
        debug!("field store: remove '{field}'");
        match self.declared.get(field) {
            Some(kind) => self.snapshot.insert(field.to_string(), kind.default_value()),
            None => {
                self.snapshot.remove(field);
            }
        }
        self.touch();
    }

    /// Agrega `item` a una lista si no existe ya (comparación sin mayúsculas,
    /// tras trim) y si no se alcanzó el máximo declarado. Devuelve `false`
    /// cuando la operación es un no-op; en ese caso el store no cambia.
    pub fn push_unique(&mut self, field: &str, item: &str) -> bool {
        let item = item.trim();
        if item.is_empty() {
            return false;
        }
        let max = match self.declared.get(field) {
            Some(FieldKind::List { max }) => *max,
            _ => None,
        };
        let Some(FieldValue::List(items)) = self.snapshot.get_mut(field) else {
            return false;
        };
        if items.iter().any(|existing| existing.eq_ignore_ascii_case(item)) {
            return false;
        }
        if max.is_some_and(|m| items.len() >= m) {
            return false;
        }
        items.push(item.to_string());
        self.touch();
        true
    }

    /// Quita `item` de una lista (misma comparación que `push_unique`).
    pub fn remove_item(&mut self, field: &str, item: &str) -> bool {
        let item = item.trim();
        let Some(FieldValue::List(items)) = self.snapshot.get_mut(field) else {
            return false;
        };
        let before = items.len();
        items.retain(|existing| !existing.eq_ignore_ascii_case(item));
        if items.len() == before {
            return false;
        }
        self.touch();
        true
    }

    pub(crate) fn mark_saving(&mut self) {
        self.status = SaveStatus::Saving;
    }

    /// Cierra un guardado iniciado en `revision`. Sólo pasa a `Saved` si no
    /// hubo mutaciones desde entonces.
    pub(crate) fn mark_saved(&mut self, revision: u64) -> SaveStatus {
        self.status = if revision == self.revision { SaveStatus::Saved } else { SaveStatus::Unsaved };
        self.status
    }

    pub(crate) fn mark_unsaved(&mut self) {
        self.status = SaveStatus::Unsaved;
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.status = SaveStatus::Unsaved;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> FieldStore {
        let mut declared = IndexMap::new();
        declared.insert("title".to_string(), FieldKind::Text);
        declared.insert("tags".to_string(), FieldKind::List { max: Some(5) });
        FieldStore::new(declared)
    }

    #[test]
    fn seeded_store_is_saved_and_has_every_field() {
        let s = store();
        assert_eq!(s.status(), SaveStatus::Saved);
        assert!(s.snapshot().contains("title"));
        assert_eq!(s.snapshot().list("tags").len(), 0);
    }

    #[test]
    fn set_marks_unsaved_and_bumps_revision() {
        let mut s = store();
        s.set("title", "Episode 1");
        assert_eq!(s.status(), SaveStatus::Unsaved);
        assert_eq!(s.revision(), 1);
        assert_eq!(s.snapshot().text("title"), "Episode 1");
    }

    #[test]
    fn remove_resets_declared_field_to_default() {
        let mut s = store();
        s.set("title", "x");
        s.remove("title");
        assert_eq!(s.get("title"), Some(&FieldValue::Text(String::new())));
        s.set("extra", "y");
        s.remove("extra");
        assert!(s.get("extra").is_none());
    }

    #[test]
    fn duplicate_tag_is_suppressed() {
        let mut s = store();
        assert!(s.push_unique("tags", "news"));
        let rev = s.revision();
        assert!(!s.push_unique("tags", "News "));
        assert_eq!(s.revision(), rev);
        assert_eq!(s.snapshot().list("tags"), ["news".to_string()]);
    }

    #[test]
    fn sixth_tag_is_a_noop() {
        let mut s = store();
        for t in ["a", "b", "c", "d", "e"] {
            assert!(s.push_unique("tags", t));
        }
        assert!(!s.push_unique("tags", "f"));
        assert_eq!(s.snapshot().list("tags").len(), 5);
    }

    #[test]
    fn saved_only_when_revision_unchanged() {
        let mut s = store();
        s.set("title", "a");
        let rev = s.revision();
        s.mark_saving();
        s.set("title", "b");
        assert_eq!(s.mark_saved(rev), SaveStatus::Unsaved);
        let rev = s.revision();
        s.mark_saving();
        assert_eq!(s.mark_saved(rev), SaveStatus::Saved);
    }
}
