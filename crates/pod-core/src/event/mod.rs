//! Eventos de sesión y trait EventStore.

mod store;
mod types;

pub use store::{BroadcastEventStore, EventStore, InMemoryEventStore};
pub use types::{WorkflowEvent, WorkflowEventKind};
