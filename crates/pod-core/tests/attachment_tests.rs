mod common;

use pod_core::constants::MB;
use pod_core::{AttachmentError, AttachmentOutcome, AttachmentUpload, Dimensions, FieldValue, ServiceError,
               WorkflowError, WorkflowEventKind, WorkflowSession};

#[tokio::test]
async fn mpeg_audio_is_staged_with_probed_duration() {
    let h = common::harness();
    let mut session = WorkflowSession::builder(common::upload_wizard(), h.services).build();

    let outcome = session.stage_attachment("audioFile", AttachmentUpload::new("ep1.mp3", "audio/mpeg", 10 * MB))
                         .await
                         .expect("accepted");
    let AttachmentOutcome::Staged(descriptor) = outcome else {
        panic!("expected staged descriptor");
    };
    assert_eq!(descriptor.mime_type, "audio/mpeg");
    assert_eq!(descriptor.size_bytes, 10 * MB);
    assert!(descriptor.metadata.duration_ms.is_some_and(|d| d > 0));
    assert_eq!(session.snapshot().attachment("audioFile"), Some(&descriptor));
}

#[tokio::test]
async fn wrong_type_is_rejected_and_slot_unchanged() {
    let h = common::harness();
    let mut session = WorkflowSession::builder(common::upload_wizard(), h.services).build();
    session.stage_attachment("audioFile", AttachmentUpload::new("ep1.mp3", "audio/mpeg", 10 * MB))
           .await
           .expect("accepted");
    let before = session.field("audioFile");
    let revision = session.revision();

    let res = session.stage_attachment("audioFile", AttachmentUpload::new("notes.txt", "text/plain", 1_000))
                     .await;
    match res {
        Err(WorkflowError::Attachment { field, source: AttachmentError::UnsupportedType { .. } }) => {
            assert_eq!(field, "audioFile")
        }
        other => panic!("expected type rejection, got {other:?}"),
    }
    assert_eq!(session.field("audioFile"), before);
    assert_eq!(session.revision(), revision);
    assert_eq!(session.errors().len(), 1);
    assert!(session.errors().get("audioFile").is_some_and(|m| m.contains("unsupported file type")));
}

#[tokio::test]
async fn cover_image_is_staged_with_preview_and_dimensions() {
    let h = common::harness();
    let mut session = WorkflowSession::builder(common::upload_wizard(), h.services).build();
    session.stage_attachment("coverImage", AttachmentUpload::new("cover.png", "image/png", 2 * MB))
           .await
           .expect("accepted");

    let cover = session.snapshot().attachment("coverImage").cloned().expect("staged");
    assert_eq!(cover.metadata.preview_handle.as_deref(), Some("blob:cover.png#preview"));
    assert_eq!(cover.metadata.dimensions,
               Some(Dimensions { width: 1400,
                                 height: 1400 }));
    assert_eq!(cover.metadata.duration_ms, None);
}

#[tokio::test]
async fn oversized_cover_image_is_rejected() {
    let h = common::harness();
    let mut session = WorkflowSession::builder(common::upload_wizard(), h.services).build();
    let res = session.stage_attachment("coverImage", AttachmentUpload::new("cover.png", "image/png", 6 * MB))
                     .await;
    assert!(matches!(res,
                     Err(WorkflowError::Attachment { source: AttachmentError::TooLarge { .. }, .. })));
    assert_eq!(session.field("coverImage"), FieldValue::Empty);
}

#[tokio::test]
async fn restaging_replaces_descriptor_wholesale() {
    let h = common::harness();
    let mut session = WorkflowSession::builder(common::upload_wizard(), h.services).build();
    session.stage_attachment("audioFile", AttachmentUpload::new("a.mp3", "audio/mpeg", 2 * MB))
           .await
           .unwrap();
    session.stage_attachment("audioFile", AttachmentUpload::new("b.wav", "audio/wav", 4 * MB))
           .await
           .unwrap();
    let current = session.snapshot().attachment("audioFile").cloned().expect("staged");
    assert_eq!(current.file_name, "b.wav");
    assert_eq!(current.mime_type, "audio/wav");
    assert_eq!(current.size_bytes, 4 * MB);
    assert_eq!(current.source_handle, "blob:b.wav");
}

#[test]
fn stale_probe_result_is_discarded() {
    let h = common::harness();
    let mut session = WorkflowSession::builder(common::upload_wizard(), h.services).build();
    let old = session.begin_attachment("audioFile", AttachmentUpload::new("old.mp3", "audio/mpeg", MB))
                     .unwrap();
    let new = session.begin_attachment("audioFile", AttachmentUpload::new("new.mp3", "audio/mpeg", MB))
                     .unwrap();

    let staged = session.finish_attachment(new, Ok(Default::default())).unwrap();
    assert!(matches!(staged, AttachmentOutcome::Staged(_)));
    let late = session.finish_attachment(old, Ok(Default::default())).unwrap();
    assert_eq!(late, AttachmentOutcome::Stale);
    assert_eq!(session.snapshot().attachment("audioFile").map(|a| a.file_name.as_str()), Some("new.mp3"));
    assert!(session.events()
                   .iter()
                   .any(|e| matches!(e.kind, WorkflowEventKind::AttachmentDiscarded { .. })));
}

#[test]
fn probe_failure_rejects_without_touching_slot() {
    let h = common::harness();
    let mut session = WorkflowSession::builder(common::upload_wizard(), h.services).build();
    let ticket = session.begin_attachment("audioFile", AttachmentUpload::new("a.mp3", "audio/mpeg", MB))
                        .unwrap();
    let res = session.finish_attachment(ticket, Err(ServiceError::Rejected("corrupt stream".into())));
    assert!(matches!(res,
                     Err(WorkflowError::Attachment { source: AttachmentError::ProbeFailed(_), .. })));
    assert_eq!(session.field("audioFile"), FieldValue::Empty);
    assert!(session.errors().contains("audioFile"));
}

#[test]
fn removal_clears_slot_and_invalidates_in_flight_probe() {
    let h = common::harness();
    let mut session = WorkflowSession::builder(common::upload_wizard(), h.services).build();
    let ticket = session.begin_attachment("audioFile", AttachmentUpload::new("a.mp3", "audio/mpeg", MB))
                        .unwrap();
    session.remove_attachment("audioFile").unwrap();
    assert_eq!(session.finish_attachment(ticket, Ok(Default::default())), Ok(AttachmentOutcome::Stale));
    assert_eq!(session.field("audioFile"), FieldValue::Empty);
    assert_eq!(session.remove_attachment("title"), Err(WorkflowError::NotAnAttachmentSlot("title".into())));
}
