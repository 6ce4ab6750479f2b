//! `RuleSet`: implementación declarativa de `Validator`.
//!
//! Cada regla declara en qué pasos se evalúa. El paso agregado (el último del
//! workflow, p.ej. "preview") evalúa la unión de todas las reglas. Un campo sin
//! regla para el paso pedido nunca se marca, aunque sea inválido: la
//! validación es perezosa y por paso.
use serde::{Deserialize, Serialize};

use super::{FieldErrors, Rule, Validator};
use crate::model::FormSnapshot;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    pub field: String,
    /// Etiqueta legible usada en los mensajes.
    pub label: String,
    pub rule: Rule,
    /// Pasos que evalúan esta regla (además del paso agregado).
    pub steps: Vec<String>,
}

impl FieldRule {
    pub fn applies_to(&self, step: &str) -> bool {
        self.steps.iter().any(|s| s == step)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    rules: Vec<FieldRule>,
    aggregate_step: Option<String>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Añade una regla evaluada en `steps`.
    pub fn rule(mut self, field: &str, label: &str, rule: Rule, steps: &[&str]) -> Self {
        self.rules.push(FieldRule { field: field.to_string(),
                                    label: label.to_string(),
                                    rule,
                                    steps: steps.iter().map(|s| s.to_string()).collect() });
        self
    }

    /// Fija el paso que evalúa todas las reglas. Lo asigna
    /// `WorkflowDefinitionBuilder::build` con el último paso declarado.
    pub fn with_aggregate_step(mut self, step: impl Into<String>) -> Self {
        self.aggregate_step = Some(step.into());
        self
    }

    pub fn aggregate_step(&self) -> Option<&str> {
        self.aggregate_step.as_deref()
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    fn is_aggregate(&self, step: &str) -> bool {
        self.aggregate_step.as_deref() == Some(step)
    }
}

impl Validator for RuleSet {
    fn validate(&self, snapshot: &FormSnapshot, step: &str) -> FieldErrors {
        let aggregate = self.is_aggregate(step);
        let mut errors = FieldErrors::new();
        for r in self.rules.iter().filter(|r| aggregate || r.applies_to(step)) {
            if errors.contains(&r.field) {
                continue;
            }
            // Sólo se validan claves presentes: los errores nunca nombran campos
            // ajenos al snapshot.
            let Some(value) = snapshot.get(&r.field) else {
                continue;
            };
            if let Some(message) = r.rule.check(&r.label, value) {
                errors.insert_first(&r.field, message);
            }
        }
        errors
    }
}
