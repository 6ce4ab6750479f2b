//! Orquestación de una sesión de formulario: Field Store + Validator + Step
//! Controller + timer de autosave + adjuntos, emitiendo eventos a un
//! `EventStore`.

pub mod builder;
pub mod session;
pub mod settings;

pub use builder::SessionBuilder;
pub use session::{AttachmentOutcome, WorkflowSession};
pub use settings::{Services, WorkflowSettings};
