//! Definición inmutable de un workflow: pasos ordenados, campos declarados,
//! reglas y rutas de salida.
use indexmap::IndexMap;

use crate::errors::WorkflowError;
use crate::model::FieldKind;
use crate::ports::Route;
use crate::validation::RuleSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSpec {
    /// Identificador estable y único dentro del workflow.
    pub id: String,
    /// Nombre amigable para la UI.
    pub title: String,
}

/// Sólo se obtiene vía `WorkflowDefinitionBuilder::build`, que garantiza al
/// menos un paso, ids únicos y reglas coherentes.
#[derive(Debug, Clone)]
pub struct WorkflowDefinition {
    name: String,
    steps: Vec<StepSpec>,
    fields: IndexMap<String, FieldKind>,
    rules: RuleSet,
    /// Ruta a la que se navega tras un submit exitoso.
    on_submit: Route,
    /// Ruta a la que se navega al descartar.
    on_discard: Route,
}

impl WorkflowDefinition {
    pub fn builder(name: impl Into<String>) -> WorkflowDefinitionBuilder {
        WorkflowDefinitionBuilder { name: name.into(),
                                    steps: Vec::new(),
                                    fields: IndexMap::new(),
                                    rules: RuleSet::new(),
                                    on_submit: Route::new("/"),
                                    on_discard: Route::new("/") }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[StepSpec] {
        &self.steps
    }

    pub fn fields(&self) -> &IndexMap<String, FieldKind> {
        &self.fields
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn on_submit(&self) -> &Route {
        &self.on_submit
    }

    pub fn on_discard(&self) -> &Route {
        &self.on_discard
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step_ids(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|s| s.id.as_str())
    }

    pub fn position(&self, step: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.id == step)
    }

    pub fn first_step(&self) -> &str {
        &self.steps[0].id
    }

    /// Paso agregado: valida todas las reglas antes del submit.
    pub fn final_step(&self) -> &str {
        &self.steps[self.steps.len() - 1].id
    }
}

#[derive(Debug)]
pub struct WorkflowDefinitionBuilder {
    name: String,
    steps: Vec<StepSpec>,
    fields: IndexMap<String, FieldKind>,
    rules: RuleSet,
    on_submit: Route,
    on_discard: Route,
}

impl WorkflowDefinitionBuilder {
    pub fn step(mut self, id: &str, title: &str) -> Self {
        self.steps.push(StepSpec { id: id.to_string(),
                                   title: title.to_string() });
        self
    }

    pub fn field(mut self, name: &str, kind: FieldKind) -> Self {
        self.fields.insert(name.to_string(), kind);
        self
    }

    pub fn rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn on_submit(mut self, route: Route) -> Self {
        self.on_submit = route;
        self
    }

    pub fn on_discard(mut self, route: Route) -> Self {
        self.on_discard = route;
        self
    }

    /// Valida la coherencia de la definición: al menos un paso, ids únicos y
    /// reglas que sólo nombran campos y pasos declarados.
    pub fn build(self) -> Result<WorkflowDefinition, WorkflowError> {
        let Some(last) = self.steps.last() else {
            return Err(WorkflowError::InvalidDefinition(format!("workflow '{}' has no steps", self.name)));
        };
        for (i, s) in self.steps.iter().enumerate() {
            if self.steps[..i].iter().any(|prev| prev.id == s.id) {
                return Err(WorkflowError::InvalidDefinition(format!("duplicate step '{}'", s.id)));
            }
        }
        for r in self.rules.rules() {
            if !self.fields.contains_key(&r.field) {
                return Err(WorkflowError::InvalidDefinition(format!("rule references undeclared field '{}'", r.field)));
            }
            if let Some(unknown) = r.steps.iter().find(|s| !self.steps.iter().any(|d| &d.id == *s)) {
                return Err(WorkflowError::InvalidDefinition(format!("rule for '{}' references unknown step '{unknown}'",
                                                                    r.field)));
            }
        }
        let rules = self.rules.with_aggregate_step(last.id.clone());
        Ok(WorkflowDefinition { name: self.name,
                                steps: self.steps,
                                fields: self.fields,
                                rules,
                                on_submit: self.on_submit,
                                on_discard: self.on_discard })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Rule;

    #[test]
    fn build_rejects_rules_on_undeclared_fields() {
        let res = WorkflowDefinition::builder("w").step("a", "A")
                                                  .rules(RuleSet::new().rule("ghost", "Ghost", Rule::Required, &["a"]))
                                                  .build();
        assert!(matches!(res, Err(WorkflowError::InvalidDefinition(_))));
    }

    #[test]
    fn build_rejects_empty_and_duplicate_steps() {
        assert!(WorkflowDefinition::builder("w").build().is_err());
        assert!(WorkflowDefinition::builder("w").step("a", "A").step("a", "A2").build().is_err());
    }

    #[test]
    fn last_step_becomes_aggregate() {
        let def = WorkflowDefinition::builder("w").step("a", "A").step("b", "B").build().expect("valid");
        assert_eq!(def.final_step(), "b");
        assert_eq!(def.rules().aggregate_step(), Some("b"));
    }
}
