//! Sesión guionada del wizard de subida de episodio contra los servicios en
//! memoria. La usa el binario `podflow-demo` y los tests de integración.
use std::sync::Arc;

use log::{info, warn};
use pod_adapters::{wire, EpisodePublisher};
use pod_core::{AttachmentOutcome, AttachmentUpload, EventStore, WorkflowError, WorkflowEvent, WorkflowSession};
use pod_domain::fields::*;
use pod_domain::{episode_upload, CatalogRepository, Episode, InMemoryCatalog};
use serde::Serialize;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::errors::core_error::CoreError;
use crate::errors::domain_error::DomainError;

const MB: u64 = pod_core::constants::MB;

#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    pub session_id: Uuid,
    pub episode: Episode,
    pub navigated_to: Vec<String>,
    pub drafts_saved: u32,
    pub events: Vec<WorkflowEvent>,
}

/// Ejecuta el recorrido completo: bloqueo de paso, rechazo de adjunto,
/// callback obsoleto, autosave, publicación fallida y reenvío manual.
pub async fn run_episode_demo<E: EventStore>(config: &AppConfig, event_store: E) -> Result<DemoReport, CoreError> {
    let (catalog, podcast) = InMemoryCatalog::seeded();
    let latency = config.latency();
    let publisher = Arc::new(EpisodePublisher::new(catalog.clone(), latency));
    publisher.fail_next(1);
    let wiring = wire(publisher, latency);
    let definition = Arc::new(episode_upload()?);
    let mut session = WorkflowSession::builder(definition, wiring.services.clone()).settings(config.workflow_settings())
                                                                                    .event_store(event_store)
                                                                                    .build();

    // details: falta la descripción
    session.set_field(PODCAST_ID, podcast.to_string())?;
    session.set_field(TITLE, "Lifetimes, Finally")?;
    session.set_field(EPISODE_NUMBER, "4")?;
    if let Err(e) = session.next_step() {
        info!("next step blocked as expected: {e}");
    }
    session.set_field(DESCRIPTION, "Where do lifetimes come from, and where do they go?")?;
    session.next_step()?;

    // media: tipo inválido, luego dos subidas en carrera
    let wrong = AttachmentUpload::new("notes.txt", "text/plain", 2_000);
    if let Err(e) = session.stage_attachment(AUDIO_FILE, wrong).await {
        warn!("attachment rejected: {e}");
    }
    let first = session.begin_attachment(AUDIO_FILE, AttachmentUpload::new("take1.mp3", "audio/mpeg", 8 * MB))?;
    let second = session.begin_attachment(AUDIO_FILE, AttachmentUpload::new("take2.mp3", "audio/mpeg", 12 * MB))?;
    let probe = Arc::clone(&wiring.services.probe);
    let probed_second = probe.probe(&second.upload, second.kind).await;
    session.finish_attachment(second, probed_second)?;
    let probed_first = probe.probe(&first.upload, first.kind).await;
    if let AttachmentOutcome::Stale = session.finish_attachment(first, probed_first)? {
        info!("stale probe result for take1.mp3 discarded");
    }
    session.stage_attachment(COVER_IMAGE, AttachmentUpload::new("cover.png", "image/png", MB))
           .await?;
    session.next_step()?;

    // content
    for tag in ["rust", "lifetimes", "Rust", "borrowck"] {
        session.add_item(TAGS, tag)?;
    }
    session.set_field(SHOW_NOTES, "Links and errata in the description.")?;
    session.set_field(VISIBILITY, "public")?;
    session.next_step()?;

    // preview: dejar vencer el autosave antes de publicar
    session.run_autosave().await?;

    let receipt = match session.submit().await {
        Ok(receipt) => receipt,
        Err(WorkflowError::Publish(e)) => {
            warn!("publish failed ({e}); retrying manually");
            session.dismiss_banner();
            session.submit().await?
        }
        Err(e) => return Err(e.into()),
    };

    let episode = catalog.get_episode(receipt.resource_id).await.map_err(DomainError::from)?;
    let drafts_saved = wiring.drafts
                             .load_draft(session.id())
                             .await
                             .map(|d| d.saves)
                             .ok_or_else(|| DomainError::NotFound(format!("draft {}", session.id())))?;
    Ok(DemoReport { session_id: session.id(),
                    episode,
                    navigated_to: wiring.navigator.routes().iter().map(|r| r.path().to_string()).collect(),
                    drafts_saved,
                    events: session.events() })
}
