//! Step Controller: máquina de estados sobre los pasos de un workflow.
//!
//! `request` valida el paso *actual* (no el destino). Si no hay errores el
//! paso actual pasa a ser el destino; si los hay, la transición se aborta y
//! los errores quedan expuestos. Un salto directo al paso final valida además
//! cada paso intermedio saltado. El paso actual siempre pertenece a la
//! enumeración de la definición.
use log::debug;

use crate::errors::WorkflowError;
use crate::model::FormSnapshot;
use crate::step::WorkflowDefinition;
use crate::validation::{FieldErrors, Validator};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// El paso cambió; la capa de presentación debe reiniciar scroll y foco.
    Moved { from: String, to: String },
    /// Se pidió el paso actual.
    Stayed,
}

#[derive(Debug, Clone)]
pub struct StepController {
    steps: Vec<String>,
    cursor: usize,
    errors: FieldErrors,
}

impl StepController {
    pub fn new(definition: &WorkflowDefinition) -> Self {
        Self { steps: definition.step_ids().map(str::to_string).collect(),
               cursor: 0,
               errors: FieldErrors::new() }
    }

    pub fn current(&self) -> &str {
        &self.steps[self.cursor]
    }

    pub fn index(&self) -> usize {
        self.cursor
    }

    pub fn is_last(&self) -> bool {
        self.cursor + 1 == self.steps.len()
    }

    /// Errores expuestos por el último intento de transición (o de submit).
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub(crate) fn errors_mut(&mut self) -> &mut FieldErrors {
        &mut self.errors
    }

    pub(crate) fn expose(&mut self, errors: FieldErrors) {
        self.errors = errors;
    }

    pub fn next_id(&self) -> Option<&str> {
        self.steps.get(self.cursor + 1).map(String::as_str)
    }

    pub fn previous_id(&self) -> Option<&str> {
        self.cursor.checked_sub(1).and_then(|i| self.steps.get(i)).map(String::as_str)
    }

    pub fn request(&mut self,
                   target: &str,
                   validator: &dyn Validator,
                   snapshot: &FormSnapshot)
                   -> Result<Transition, WorkflowError> {
        let Some(target_index) = self.steps.iter().position(|s| s == target) else {
            return Err(WorkflowError::UnknownStep(target.to_string()));
        };
        if target_index == self.cursor {
            return Ok(Transition::Stayed);
        }
        let from = self.current().to_string();
        // Saltar al paso final exige también los pasos intermedios.
        let skipped = if target_index + 1 == self.steps.len() && target_index > self.cursor + 1 {
            self.cursor + 1..target_index
        } else {
            0..0
        };
        for step in std::iter::once(from.as_str()).chain(self.steps[skipped].iter().map(String::as_str)) {
            let errors = validator.validate(snapshot, step);
            if !errors.is_empty() {
                debug!("step '{from}' -> '{target}' blocked at '{step}' ({} errors)", errors.len());
                self.errors = errors.clone();
                return Err(WorkflowError::StepBlocked { step: step.to_string(),
                                                        errors });
            }
        }
        self.errors = FieldErrors::new();
        self.cursor = target_index;
        debug!("step '{from}' -> '{target}'");
        Ok(Transition::Moved { from,
                               to: target.to_string() })
    }
}
