//! Builder de `WorkflowSession`.
//!
//! ```ignore
//! let mut session = WorkflowSession::builder(definition, services)
//!     .settings(settings)
//!     .event_store(BroadcastEventStore::default())
//!     .build();
//! ```
use std::sync::Arc;

use uuid::Uuid;

use super::{Services, WorkflowSession, WorkflowSettings};
use crate::event::EventStore;
use crate::step::WorkflowDefinition;
use crate::validation::Validator;

pub struct SessionBuilder<E: EventStore> {
    pub(crate) definition: Arc<WorkflowDefinition>,
    pub(crate) services: Services,
    pub(crate) settings: WorkflowSettings,
    pub(crate) validator: Option<Arc<dyn Validator>>,
    pub(crate) event_store: E,
    pub(crate) session_id: Option<Uuid>,
}

impl<E: EventStore> SessionBuilder<E> {
    pub fn settings(mut self, settings: WorkflowSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Reemplaza el validador derivado de las reglas de la definición.
    pub fn validator(mut self, validator: Arc<dyn Validator>) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Fija el id de la sesión (p.ej. al retomar un borrador).
    pub fn session_id(mut self, id: Uuid) -> Self {
        self.session_id = Some(id);
        self
    }

    /// Cambia el store de eventos; transiciona el tipo del builder.
    pub fn event_store<E2: EventStore>(self, event_store: E2) -> SessionBuilder<E2> {
        SessionBuilder { definition: self.definition,
                         services: self.services,
                         settings: self.settings,
                         validator: self.validator,
                         event_store,
                         session_id: self.session_id }
    }

    pub fn build(self) -> WorkflowSession<E> {
        WorkflowSession::from_builder(self)
    }
}
