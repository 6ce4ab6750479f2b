//! pod-adapters: colaboradores en memoria con latencia simulada.
//!
//! Sustituyen al backend real (fuera de alcance) para el binario de demo y
//! los tests de extremo a extremo.
pub mod drafts;
pub mod latency;
pub mod navigator;
pub mod probe;
pub mod publisher;

use std::sync::Arc;

use pod_core::{Publisher, Services};

pub use drafts::{InMemoryDraftStore, StoredDraft};
pub use latency::Latency;
pub use navigator::RecordingNavigator;
pub use probe::SimulatedProbe;
pub use publisher::{EpisodePublisher, PodcastPublisher, ProfilePublisher, ProfileRecord};

/// Adaptadores compartidos de un workflow, con handles para inspeccionarlos.
pub struct Wiring {
    pub drafts: Arc<InMemoryDraftStore>,
    pub navigator: Arc<RecordingNavigator>,
    pub services: Services,
}

/// Cablea un publicador con borradores, probe y navegador en memoria.
pub fn wire(publisher: Arc<dyn Publisher>, latency: Latency) -> Wiring {
    let drafts = Arc::new(InMemoryDraftStore::new(latency));
    let navigator = Arc::new(RecordingNavigator::default());
    let services = Services { drafts: drafts.clone(),
                              publisher,
                              probe: Arc::new(SimulatedProbe::new(latency)),
                              navigator: navigator.clone() };
    Wiring { drafts,
             navigator,
             services }
}
