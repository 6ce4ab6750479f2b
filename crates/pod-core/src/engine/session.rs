//! `WorkflowSession`: una sesión de edición de un workflow.
//!
//! Modelo de ejecución: single-thread, dirigido por eventos de UI. Toda
//! mutación pasa por `&mut self`, por lo que el orden de aplicación es el
//! orden de emisión. Los únicos puntos de suspensión son el guardado de
//! borrador (espera del debounce + llamada al `DraftStore`) y el sondeo de
//! adjuntos. Ambos existen también en dos fases (`begin_*` / `complete_*`,
//! `finish_*`) para que el host pueda seguir editando mientras la llamada
//! externa está en vuelo.
use std::sync::Arc;

use log::{debug, info, warn};
use tokio::time::{sleep_until, Instant};
use uuid::Uuid;

use super::builder::SessionBuilder;
use super::{Services, WorkflowSettings};
use crate::attachment::{AttachmentHandler, StagingTicket};
use crate::autosave::{DebounceTimer, DraftTicket};
use crate::constants::SUBMIT_BLOCKED_MESSAGE;
use crate::errors::{AttachmentError, ServiceError, WorkflowError};
use crate::event::{EventStore, InMemoryEventStore, WorkflowEvent, WorkflowEventKind};
use crate::model::{AttachmentDescriptor, AttachmentKind, AttachmentMetadata, AttachmentUpload, FieldValue,
                   FormSnapshot};
use crate::ports::{PublishReceipt, Route};
use crate::step::{StepController, Transition, WorkflowDefinition};
use crate::store::{FieldStore, SaveStatus};
use crate::validation::{FieldErrors, Validator};

/// Resultado de cerrar un staging de adjunto.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentOutcome {
    /// El descriptor quedó en el Field Store (reemplazando al anterior).
    Staged(AttachmentDescriptor),
    /// El resultado pertenecía a un ticket obsoleto y se descartó.
    Stale,
}

pub struct WorkflowSession<E: EventStore = InMemoryEventStore> {
    id: Uuid,
    definition: Arc<WorkflowDefinition>,
    validator: Arc<dyn Validator>,
    store: FieldStore,
    steps: StepController,
    attachments: AttachmentHandler,
    timer: DebounceTimer,
    services: Services,
    events: E,
    banner: Option<String>,
    /// Último `SaveStatus` notificado a los observadores.
    announced: SaveStatus,
    closed: bool,
}

impl WorkflowSession<InMemoryEventStore> {
    /// Crea un builder con store de eventos en memoria.
    pub fn builder(definition: Arc<WorkflowDefinition>, services: Services) -> SessionBuilder<InMemoryEventStore> {
        SessionBuilder { definition,
                         services,
                         settings: WorkflowSettings::default(),
                         validator: None,
                         event_store: InMemoryEventStore::default(),
                         session_id: None }
    }
}

impl<E: EventStore> WorkflowSession<E> {
    pub(crate) fn from_builder(b: SessionBuilder<E>) -> Self {
        let validator: Arc<dyn Validator> = match b.validator {
            Some(v) => v,
            None => Arc::new(b.definition.rules().clone()),
        };
        let mut session = Self { id: b.session_id.unwrap_or_else(Uuid::new_v4),
                                 store: FieldStore::new(b.definition.fields().clone()),
                                 steps: StepController::new(&b.definition),
                                 attachments: AttachmentHandler::new(b.settings.policies),
                                 timer: DebounceTimer::new(b.settings.autosave_delay),
                                 definition: b.definition,
                                 validator,
                                 services: b.services,
                                 events: b.event_store,
                                 banner: None,
                                 announced: SaveStatus::Saved,
                                 closed: false };
        let kind = WorkflowEventKind::SessionStarted { workflow: session.definition.name().to_string(),
                                                       step: session.steps.current().to_string() };
        session.emit(kind);
        info!("session {} started for workflow '{}'", session.id, session.definition.name());
        session
    }

    // ---- consultas ----

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn definition(&self) -> &WorkflowDefinition {
        &self.definition
    }

    pub fn current_step(&self) -> &str {
        self.steps.current()
    }

    /// Errores expuestos para el paso actual (o por el último submit).
    pub fn errors(&self) -> &FieldErrors {
        self.steps.errors()
    }

    /// Mensaje de nivel formulario (submit bloqueado, fallo de servicio).
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn save_status(&self) -> SaveStatus {
        self.store.status()
    }

    pub fn snapshot(&self) -> &FormSnapshot {
        self.store.snapshot()
    }

    pub fn field(&self, field: &str) -> FieldValue {
        self.store.get_or_default(field)
    }

    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn event_store(&self) -> &E {
        &self.events
    }

    pub fn events(&self) -> Vec<WorkflowEvent> {
        self.events.list(self.id)
    }

    /// Valida un paso sin exponer los errores ni mover el cursor.
    pub fn validate(&self, step: &str) -> Result<FieldErrors, WorkflowError> {
        if self.definition.position(step).is_none() {
            return Err(WorkflowError::UnknownStep(step.to_string()));
        }
        Ok(self.validator.validate(self.store.snapshot(), step))
    }

    // ---- Field Store ----

    /// Reemplaza el valor de un campo. Los slots de adjunto sólo aceptan
    /// valores vía staging.
    pub fn set_field(&mut self, field: &str, value: impl Into<FieldValue>) -> Result<(), WorkflowError> {
        self.ensure_open()?;
        let value = value.into();
        if matches!(value, FieldValue::Attachment(_)) {
            return Err(WorkflowError::AttachmentSlot(field.to_string()));
        }
        if let Some(kind) = self.store.kind_of(field) {
            if kind.attachment_kind().is_some() {
                return Err(WorkflowError::AttachmentSlot(field.to_string()));
            }
            if !kind.accepts(&value) {
                return Err(WorkflowError::TypeMismatch(field.to_string()));
            }
        }
        self.store.set(field, value);
        let revision = self.store.revision();
        self.after_mutation(WorkflowEventKind::FieldChanged { field: field.to_string(),
                                                              revision });
        Ok(())
    }

    /// Limpia un campo (vuelve a su default). En slots de adjunto además
    /// invalida cualquier sondeo en vuelo.
    pub fn remove_field(&mut self, field: &str) -> Result<(), WorkflowError> {
        self.ensure_open()?;
        if self.store.kind_of(field).and_then(|k| k.attachment_kind()).is_some() {
            self.attachments.invalidate(field);
            self.steps.errors_mut().clear_field(field);
        }
        self.store.remove(field);
        let revision = self.store.revision();
        self.after_mutation(WorkflowEventKind::FieldCleared { field: field.to_string(),
                                                              revision });
        Ok(())
    }

    /// Agrega un elemento a un campo lista (sin duplicados, respetando el
    /// máximo declarado). `Ok(false)` indica no-op.
    pub fn add_item(&mut self, field: &str, item: &str) -> Result<bool, WorkflowError> {
        self.ensure_list(field)?;
        if !self.store.push_unique(field, item) {
            debug!("session {}: '{item}' not added to '{field}'", self.id);
            return Ok(false);
        }
        let revision = self.store.revision();
        self.after_mutation(WorkflowEventKind::FieldChanged { field: field.to_string(),
                                                              revision });
        Ok(true)
    }

    pub fn remove_item(&mut self, field: &str, item: &str) -> Result<bool, WorkflowError> {
        self.ensure_list(field)?;
        if !self.store.remove_item(field, item) {
            return Ok(false);
        }
        let revision = self.store.revision();
        self.after_mutation(WorkflowEventKind::FieldChanged { field: field.to_string(),
                                                              revision });
        Ok(true)
    }

    // ---- Step Controller ----

    /// Pide el paso `target`. Se valida el paso actual; si falla, el paso no
    /// cambia y los errores quedan expuestos.
    pub fn request_step(&mut self, target: &str) -> Result<Transition, WorkflowError> {
        self.ensure_open()?;
        let res = self.steps.request(target, self.validator.as_ref(), self.store.snapshot());
        match &res {
            Ok(Transition::Moved { from, to }) => {
                let kind = WorkflowEventKind::StepChanged { from: from.clone(),
                                                            to: to.clone() };
                self.emit(kind);
            }
            Ok(Transition::Stayed) => {}
            Err(WorkflowError::StepBlocked { step, errors }) => {
                let kind = WorkflowEventKind::StepBlocked { step: step.clone(),
                                                            errors: errors.clone() };
                self.emit(kind);
            }
            Err(_) => {}
        }
        res
    }

    pub fn next_step(&mut self) -> Result<Transition, WorkflowError> {
        let target = self.steps
                         .next_id()
                         .map(str::to_string)
                         .ok_or_else(|| WorkflowError::NoNextStep(self.steps.current().to_string()))?;
        self.request_step(&target)
    }

    pub fn previous_step(&mut self) -> Result<Transition, WorkflowError> {
        let target = self.steps
                         .previous_id()
                         .map(str::to_string)
                         .ok_or_else(|| WorkflowError::NoPreviousStep(self.steps.current().to_string()))?;
        self.request_step(&target)
    }

    // ---- adjuntos ----

    /// Fase 1 del staging: valida tipo y tamaño. Un rechazo deja un único
    /// error para el campo y no toca el slot.
    pub fn begin_attachment(&mut self, field: &str, upload: AttachmentUpload) -> Result<StagingTicket, WorkflowError> {
        self.ensure_open()?;
        let kind = self.attachment_kind(field)?;
        match self.attachments.begin(field, kind, upload) {
            Ok(ticket) => {
                self.steps.errors_mut().clear_field(field);
                Ok(ticket)
            }
            Err(e) => Err(self.reject_attachment(field, e)),
        }
    }

    /// Fase 2 del staging: aplica el resultado del sondeo si el ticket sigue
    /// vigente. El descriptor reemplaza por completo al anterior.
    pub fn finish_attachment(&mut self,
                             ticket: StagingTicket,
                             probed: Result<AttachmentMetadata, ServiceError>)
                             -> Result<AttachmentOutcome, WorkflowError> {
        self.ensure_open()?;
        let field = ticket.field.clone();
        let token = ticket.token;
        match probed {
            Ok(metadata) => match self.attachments.settle(ticket, metadata) {
                Some(descriptor) => {
                    self.store.set(field.as_str(), FieldValue::Attachment(descriptor.clone()));
                    info!("session {}: staged '{}' into '{field}'", self.id, descriptor.file_name);
                    self.after_mutation(WorkflowEventKind::AttachmentStaged { field,
                                                                              descriptor: descriptor.clone() });
                    Ok(AttachmentOutcome::Staged(descriptor))
                }
                None => {
                    self.emit(WorkflowEventKind::AttachmentDiscarded { field, token });
                    Ok(AttachmentOutcome::Stale)
                }
            },
            Err(service_err) => {
                if self.attachments.abandon(&ticket) {
                    Err(self.reject_attachment(&field, AttachmentError::ProbeFailed(service_err.to_string())))
                } else {
                    self.emit(WorkflowEventKind::AttachmentDiscarded { field, token });
                    Ok(AttachmentOutcome::Stale)
                }
            }
        }
    }

    /// Staging completo: validar, sondear metadatos y escribir el descriptor.
    pub async fn stage_attachment(&mut self,
                                  field: &str,
                                  upload: AttachmentUpload)
                                  -> Result<AttachmentOutcome, WorkflowError> {
        let ticket = self.begin_attachment(field, upload)?;
        let probe = Arc::clone(&self.services.probe);
        let probed = probe.probe(&ticket.upload, ticket.kind).await;
        self.finish_attachment(ticket, probed)
    }

    pub fn remove_attachment(&mut self, field: &str) -> Result<(), WorkflowError> {
        self.attachment_kind(field)?;
        self.remove_field(field)
    }

    // ---- autosave ----

    pub fn autosave_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    pub fn autosave_due(&self) -> bool {
        self.timer.is_due(Instant::now())
    }

    /// Dispara el autosave si el debounce venció. `Ok(false)` si no tocaba.
    pub async fn tick(&mut self) -> Result<bool, WorkflowError> {
        if self.closed || !self.timer.poll(Instant::now()) {
            return Ok(false);
        }
        self.persist_draft().await?;
        Ok(true)
    }

    /// Espera el vencimiento del debounce (si está armado) y guarda. El
    /// future puede descartarse (p.ej. en un `select!` con la siguiente
    /// entrada de usuario) sin efectos: el timer queda armado.
    pub async fn run_autosave(&mut self) -> Result<bool, WorkflowError> {
        while let Some(deadline) = self.timer.deadline() {
            sleep_until(deadline).await;
            if self.tick().await? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Guardado manual: cancela el debounce y guarda de inmediato.
    pub async fn save_draft(&mut self) -> Result<SaveStatus, WorkflowError> {
        self.ensure_open()?;
        self.timer.cancel();
        self.persist_draft().await
    }

    /// Fase 1 del guardado: `Saving` + copia del snapshot.
    pub fn begin_draft_save(&mut self) -> Result<DraftTicket, WorkflowError> {
        self.ensure_open()?;
        self.store.mark_saving();
        self.announce(SaveStatus::Saving);
        Ok(DraftTicket { session_id: self.id,
                         revision: self.store.revision(),
                         snapshot: self.store.snapshot().clone() })
    }

    /// Fase 2 del guardado. Sin reintentos: un fallo deja `Unsaved` y un
    /// banner; el siguiente cambio (o un guardado manual) vuelve a intentar.
    pub fn complete_draft_save(&mut self,
                               ticket: DraftTicket,
                               result: Result<(), ServiceError>)
                               -> Result<SaveStatus, WorkflowError> {
        match result {
            Ok(()) => {
                let after = self.store.mark_saved(ticket.revision);
                if after == SaveStatus::Saved {
                    info!("session {}: draft saved at revision {}", self.id, ticket.revision);
                    self.emit(WorkflowEventKind::DraftSaved { revision: ticket.revision });
                } else {
                    debug!("session {}: revision {} saved but store moved on", self.id, ticket.revision);
                }
                self.announce(after);
                Ok(after)
            }
            Err(e) => {
                warn!("session {}: draft save failed: {e}", self.id);
                self.store.mark_unsaved();
                self.announce(SaveStatus::Unsaved);
                self.banner = Some(format!("Draft could not be saved: {e}"));
                self.emit(WorkflowEventKind::DraftSaveFailed { message: e.to_string() });
                Err(WorkflowError::Persistence(e))
            }
        }
    }

    async fn persist_draft(&mut self) -> Result<SaveStatus, WorkflowError> {
        let ticket = self.begin_draft_save()?;
        let drafts = Arc::clone(&self.services.drafts);
        let result = drafts.save_draft(ticket.session_id, &ticket.snapshot).await;
        self.complete_draft_save(ticket, result)
    }

    // ---- submit / descarte ----

    /// Submit final: valida el paso agregado y, si pasa, publica. Un bloqueo o
    /// fallo queda como banner; la sesión sigue abierta para reintentar a mano.
    pub async fn submit(&mut self) -> Result<PublishReceipt, WorkflowError> {
        self.ensure_open()?;
        let errors = self.validator.validate(self.store.snapshot(), self.definition.final_step());
        if !errors.is_empty() {
            warn!("session {}: submit blocked ({} invalid fields)", self.id, errors.len());
            self.steps.expose(errors.clone());
            self.banner = Some(SUBMIT_BLOCKED_MESSAGE.to_string());
            self.emit(WorkflowEventKind::SubmitBlocked { errors: errors.clone() });
            return Err(WorkflowError::SubmitBlocked { errors });
        }
        self.steps.expose(FieldErrors::new());
        self.banner = None;

        let publisher = Arc::clone(&self.services.publisher);
        match publisher.publish(self.id, self.store.snapshot()).await {
            Ok(receipt) => {
                info!("session {}: published as {}", self.id, receipt.resource_id);
                self.emit(WorkflowEventKind::Published { resource_id: receipt.resource_id });
                let route = self.definition.on_submit().clone();
                self.close_and_navigate(route);
                Ok(receipt)
            }
            Err(e) => {
                warn!("session {}: publish failed: {e}", self.id);
                self.banner = Some(format!("Publishing failed: {e}"));
                self.emit(WorkflowEventKind::PublishFailed { message: e.to_string() });
                Err(WorkflowError::Publish(e))
            }
        }
    }

    /// Descarta la sesión y navega a la ruta de descarte.
    pub fn discard(&mut self) -> Result<(), WorkflowError> {
        self.ensure_open()?;
        info!("session {}: discarded", self.id);
        self.emit(WorkflowEventKind::Discarded);
        let route = self.definition.on_discard().clone();
        self.close_and_navigate(route);
        Ok(())
    }

    pub fn dismiss_banner(&mut self) {
        if self.banner.take().is_some() {
            self.emit(WorkflowEventKind::BannerDismissed);
        }
    }

    // ---- internos ----

    fn emit(&mut self, kind: WorkflowEventKind) -> WorkflowEvent {
        self.events.append_kind(self.id, kind)
    }

    fn ensure_open(&self) -> Result<(), WorkflowError> {
        if self.closed {
            Err(WorkflowError::SessionClosed)
        } else {
            Ok(())
        }
    }

    fn ensure_list(&self, field: &str) -> Result<(), WorkflowError> {
        self.ensure_open()?;
        match self.store.get(field) {
            Some(FieldValue::List(_)) => Ok(()),
            _ => Err(WorkflowError::NotAList(field.to_string())),
        }
    }

    fn attachment_kind(&self, field: &str) -> Result<AttachmentKind, WorkflowError> {
        self.store
            .kind_of(field)
            .and_then(|k| k.attachment_kind())
            .ok_or_else(|| WorkflowError::NotAnAttachmentSlot(field.to_string()))
    }

    fn reject_attachment(&mut self, field: &str, error: AttachmentError) -> WorkflowError {
        warn!("session {}: attachment rejected for '{field}': {error}", self.id);
        self.steps.errors_mut().set(field, error.to_string());
        self.emit(WorkflowEventKind::AttachmentRejected { field: field.to_string(),
                                                          message: error.to_string() });
        WorkflowError::Attachment { field: field.to_string(),
                                    source: error }
    }

    /// Emite el evento de la mutación y rearma el debounce. El store ya marcó
    /// `Unsaved`.
    fn after_mutation(&mut self, kind: WorkflowEventKind) {
        self.emit(kind);
        self.timer.arm(Instant::now());
        self.announce(SaveStatus::Unsaved);
    }

    fn announce(&mut self, status: SaveStatus) {
        if self.announced != status {
            self.announced = status;
            self.emit(WorkflowEventKind::SaveStatusChanged { status });
        }
    }

    fn close_and_navigate(&mut self, route: Route) {
        self.closed = true;
        self.timer.cancel();
        info!("session {}: navigating to {route}", self.id);
        self.services.navigator.navigate(&route);
        self.emit(WorkflowEventKind::Navigated { route });
    }
}
