//! Validador puro, con reglas por paso.

mod field_errors;
mod rule;
mod rule_set;

pub use field_errors::FieldErrors;
pub use rule::Rule;
pub use rule_set::{FieldRule, RuleSet};

use crate::model::FormSnapshot;

/// Validación pura y determinista: `(snapshot, step) -> FieldErrors`.
pub trait Validator: Send + Sync {
    fn validate(&self, snapshot: &FormSnapshot, step: &str) -> FieldErrors;
}
