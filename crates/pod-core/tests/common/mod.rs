//! Colaboradores de prueba compartidos por los tests de integración.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use pod_core::{AttachmentKind, AttachmentMetadata, AttachmentUpload, Dimensions, DraftStore, FieldKind, FormSnapshot,
               MetadataProbe, Navigator, PublishReceipt, Publisher, Route, Rule, RuleSet, ServiceError, Services,
               WorkflowDefinition};
use uuid::Uuid;

#[derive(Default)]
pub struct RecordingDrafts {
    pub saves: Mutex<Vec<FormSnapshot>>,
    pub fail: AtomicBool,
}

#[async_trait]
impl DraftStore for RecordingDrafts {
    async fn save_draft(&self, _session_id: Uuid, snapshot: &FormSnapshot) -> Result<(), ServiceError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ServiceError::Unavailable("drafts offline".into()));
        }
        self.saves.lock().unwrap().push(snapshot.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingPublisher {
    pub published: Mutex<Vec<FormSnapshot>>,
    /// Cantidad de llamadas que deben fallar antes de aceptar.
    pub failures_left: AtomicUsize,
}

#[async_trait]
impl Publisher for RecordingPublisher {
    async fn publish(&self, _session_id: Uuid, snapshot: &FormSnapshot) -> Result<PublishReceipt, ServiceError> {
        if self.failures_left.load(Ordering::SeqCst) > 0 {
            self.failures_left.fetch_sub(1, Ordering::SeqCst);
            return Err(ServiceError::Unavailable("publish backend down".into()));
        }
        self.published.lock().unwrap().push(snapshot.clone());
        Ok(PublishReceipt { resource_id: Uuid::new_v4(),
                            published_at: Utc::now() })
    }
}

/// Duración = bytes / 16 KB/s (128 kbps).
pub struct FixedProbe;

#[async_trait]
impl MetadataProbe for FixedProbe {
    async fn probe(&self, upload: &AttachmentUpload, kind: AttachmentKind) -> Result<AttachmentMetadata, ServiceError> {
        Ok(match kind {
            AttachmentKind::Audio => AttachmentMetadata { duration_ms: Some(upload.size_bytes * 1_000 / 16_000),
                                                          ..AttachmentMetadata::default() },
            AttachmentKind::Image => AttachmentMetadata { duration_ms: None,
                                                          dimensions: Some(Dimensions { width: 1400,
                                                                                        height: 1400 }),
                                                          preview_handle: Some(format!("{}#preview",
                                                                                       upload.source_handle)) },
            AttachmentKind::Transcript => AttachmentMetadata::default(),
        })
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub routes: Mutex<Vec<Route>>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &Route) {
        self.routes.lock().unwrap().push(route.clone());
    }
}

pub struct Harness {
    pub drafts: Arc<RecordingDrafts>,
    pub publisher: Arc<RecordingPublisher>,
    pub navigator: Arc<RecordingNavigator>,
    pub services: Services,
}

pub fn harness() -> Harness {
    let drafts = Arc::new(RecordingDrafts::default());
    let publisher = Arc::new(RecordingPublisher::default());
    let navigator = Arc::new(RecordingNavigator::default());
    let services = Services { drafts: drafts.clone(),
                              publisher: publisher.clone(),
                              probe: Arc::new(FixedProbe),
                              navigator: navigator.clone() };
    Harness { drafts,
              publisher,
              navigator,
              services }
}

/// Wizard mínimo de subida de episodio: details -> media -> content -> preview.
pub fn upload_wizard() -> Arc<WorkflowDefinition> {
    let rules = RuleSet::new().rule("title", "Title", Rule::Required, &["details"])
                              .rule("title", "Title", Rule::MaxLength(100), &["details"])
                              .rule("description", "Description", Rule::Required, &["details"])
                              .rule("episodeNumber", "Episode number", Rule::Digits, &["details"])
                              .rule("audioFile", "Audio file", Rule::RequiredAttachment, &["media"])
                              .rule("tags", "Tags", Rule::MaxItems(5), &["content"]);
    let def = WorkflowDefinition::builder("episode-upload").step("details", "Details")
                                                            .step("media", "Media")
                                                            .step("content", "Content")
                                                            .step("preview", "Preview")
                                                            .field("title", FieldKind::Text)
                                                            .field("description", FieldKind::Text)
                                                            .field("episodeNumber", FieldKind::Text)
                                                            .field("audioFile", FieldKind::Attachment(AttachmentKind::Audio))
                                                            .field("coverImage", FieldKind::Attachment(AttachmentKind::Image))
                                                            .field("tags", FieldKind::List { max: Some(5) })
                                                            .rules(rules)
                                                            .on_submit(Route::new("/dashboard/episodes"))
                                                            .on_discard(Route::new("/dashboard"))
                                                            .build()
                                                            .expect("valid wizard definition");
    Arc::new(def)
}
