//! Pasos del workflow: definición inmutable y controlador (FSM).

mod controller;
mod definition;

pub use controller::{StepController, Transition};
pub use definition::{StepSpec, WorkflowDefinition, WorkflowDefinitionBuilder};
