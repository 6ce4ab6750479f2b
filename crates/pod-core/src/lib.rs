//! pod-core: motor de formularios multi-paso (wizard) con validación por
//! paso, autosave con debounce y staging de adjuntos.
//!
//! El core no conoce podcasts ni episodios: trabaja con campos, reglas,
//! pasos y colaboradores externos (`ports`). Los workflows concretos viven en
//! `pod-domain`; los colaboradores simulados en `pod-adapters`.
pub mod attachment;
pub mod autosave;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod event;
pub mod model;
pub mod ports;
pub mod step;
pub mod store;
pub mod validation;

pub use attachment::{AttachmentHandler, AttachmentPolicies, AttachmentPolicy, StagingTicket};
pub use autosave::{DebounceTimer, DraftTicket};
pub use engine::{AttachmentOutcome, SessionBuilder, Services, WorkflowSession, WorkflowSettings};
pub use errors::{AttachmentError, ServiceError, WorkflowError};
pub use event::{BroadcastEventStore, EventStore, InMemoryEventStore, WorkflowEvent, WorkflowEventKind};
pub use model::{AttachmentDescriptor, AttachmentKind, AttachmentMetadata, AttachmentUpload, Dimensions, FieldKind,
                FieldValue, FormSnapshot};
pub use ports::{DraftStore, MetadataProbe, Navigator, PublishReceipt, Publisher, Route};
pub use step::{StepController, StepSpec, Transition, WorkflowDefinition, WorkflowDefinitionBuilder};
pub use store::{FieldStore, SaveStatus};
pub use validation::{FieldErrors, FieldRule, Rule, RuleSet, Validator};
