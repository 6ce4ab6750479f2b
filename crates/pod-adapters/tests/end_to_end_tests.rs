use std::sync::Arc;
use std::time::Duration;

use pod_adapters::{wire, EpisodePublisher, Latency, PodcastPublisher, ProfilePublisher};
use pod_core::constants::MB;
use pod_core::{AttachmentOutcome, AttachmentUpload, SaveStatus, Transition, WorkflowError, WorkflowSession};
use pod_domain::fields::*;
use pod_domain::workflows::routes;
use pod_domain::{episode_upload, podcast_editor, profile_editor, CatalogRepository, EpisodeQuery, InMemoryCatalog};

#[tokio::test(start_paused = true)]
async fn episode_wizard_publishes_into_catalog() {
    let (catalog, podcast) = InMemoryCatalog::seeded();
    let latency = Latency::default();
    let wiring = wire(Arc::new(EpisodePublisher::new(catalog.clone(), latency)), latency);
    let mut session = WorkflowSession::builder(Arc::new(episode_upload().unwrap()), wiring.services.clone()).build();

    session.set_field(PODCAST_ID, podcast.to_string()).unwrap();
    session.set_field(TITLE, "Lifetimes, Finally").unwrap();
    session.set_field(DESCRIPTION, "Where do 'a come from?").unwrap();
    session.set_field(EPISODE_NUMBER, "4").unwrap();
    assert_eq!(session.next_step().unwrap(),
               Transition::Moved { from: STEP_DETAILS.into(),
                                   to: STEP_MEDIA.into() });

    // Sin audio el paso media no avanza.
    assert!(matches!(session.next_step(), Err(WorkflowError::StepBlocked { .. })));
    assert_eq!(session.current_step(), STEP_MEDIA);
    assert!(session.errors().contains(AUDIO_FILE));

    let outcome = session.stage_attachment(AUDIO_FILE, AttachmentUpload::new("ep4.mp3", "audio/mpeg", 10 * MB))
                         .await
                         .unwrap();
    assert!(matches!(outcome, AttachmentOutcome::Staged(_)));
    let audio = session.snapshot().attachment(AUDIO_FILE).cloned().unwrap();
    // 10 MB a 128 kbps.
    assert_eq!(audio.metadata.duration_ms, Some(10 * MB * 8_000 / 128_000));

    let rejected = session.stage_attachment(AUDIO_FILE, AttachmentUpload::new("notes.txt", "text/plain", 2_000))
                          .await;
    assert!(matches!(rejected, Err(WorkflowError::Attachment { .. })));
    assert_eq!(session.snapshot().attachment(AUDIO_FILE), Some(&audio));

    session.next_step().unwrap();
    assert!(session.add_item(TAGS, "news").unwrap());
    assert!(!session.add_item(TAGS, "News").unwrap());
    session.next_step().unwrap();
    assert_eq!(session.current_step(), STEP_PREVIEW);

    // El autosave vence mientras el usuario revisa.
    tokio::time::advance(Duration::from_secs(3)).await;
    assert!(session.tick().await.unwrap());
    assert_eq!(session.save_status(), SaveStatus::Saved);
    assert_eq!(wiring.drafts.load_draft(session.id()).await.unwrap().snapshot, *session.snapshot());

    let receipt = session.submit().await.unwrap();
    assert!(session.is_closed());
    assert_eq!(wiring.navigator.last().unwrap().path(), routes::EPISODES);

    let stored = catalog.get_episode(receipt.resource_id).await.unwrap();
    assert_eq!(stored.title, "Lifetimes, Finally");
    assert_eq!(stored.tags, vec!["news".to_string()]);
    assert_eq!(stored.audio, Some(audio));
    assert_eq!(catalog.list_episodes(&EpisodeQuery::new().podcast(podcast)).await.len(), 4);
}

#[tokio::test(start_paused = true)]
async fn failed_publish_can_be_resubmitted() {
    let (catalog, podcast) = InMemoryCatalog::seeded();
    let publisher = Arc::new(EpisodePublisher::new(catalog.clone(), Latency::none()));
    publisher.fail_next(1);
    let wiring = wire(publisher.clone(), Latency::none());
    let mut session = WorkflowSession::builder(Arc::new(episode_upload().unwrap()), wiring.services.clone()).build();
    session.set_field(PODCAST_ID, podcast.to_string()).unwrap();
    session.set_field(TITLE, "Retry me").unwrap();
    session.set_field(DESCRIPTION, "d").unwrap();
    session.stage_attachment(AUDIO_FILE, AttachmentUpload::new("a.mp3", "audio/mpeg", MB))
           .await
           .unwrap();

    assert!(matches!(session.submit().await, Err(WorkflowError::Publish(_))));
    assert!(session.banner().unwrap().starts_with("Publishing failed"));
    assert!(!session.is_closed());
    assert!(wiring.navigator.routes().is_empty());

    session.dismiss_banner();
    session.submit().await.unwrap();
    assert!(session.is_closed());
    assert_eq!(catalog.list_episodes(&EpisodeQuery::new()).await.len(), 4);
}

#[tokio::test(start_paused = true)]
async fn podcast_editor_updates_existing_podcast() {
    let (catalog, podcast) = InMemoryCatalog::seeded();
    let before = catalog.get_podcast(podcast).await.unwrap();
    let latency = Latency::default();
    let wiring = wire(Arc::new(PodcastPublisher::new(catalog.clone(), latency).editing(podcast)), latency);
    let mut session = WorkflowSession::builder(Arc::new(podcast_editor().unwrap()), wiring.services.clone()).build();
    session.set_field(TITLE, "The Rust Hour (Remastered)").unwrap();
    session.set_field(DESCRIPTION, before.description.clone()).unwrap();
    session.set_field(AUTHOR, before.author.clone()).unwrap();
    session.set_field(CATEGORY, "Technology").unwrap();
    session.set_field(LANGUAGE, "en").unwrap();
    assert!(matches!(session.next_step().unwrap(), Transition::Moved { .. }));

    assert!(matches!(session.submit().await, Err(WorkflowError::SubmitBlocked { .. })));
    session.stage_attachment(ARTWORK, AttachmentUpload::new("art.jpg", "image/jpeg", 2 * MB))
           .await
           .unwrap();
    session.submit().await.unwrap();

    let after = catalog.get_podcast(podcast).await.unwrap();
    assert_eq!(after.title, "The Rust Hour (Remastered)");
    assert_eq!(after.created_at, before.created_at);
    assert!(after.artwork.is_some());
    assert_eq!(wiring.navigator.last().unwrap().path(), routes::PODCASTS);
}

#[tokio::test(start_paused = true)]
async fn profile_discard_leaves_record_untouched() {
    let publisher = Arc::new(ProfilePublisher::new(Latency::none()));
    let wiring = wire(publisher.clone(), Latency::none());
    let mut session = WorkflowSession::builder(Arc::new(profile_editor().unwrap()), wiring.services.clone()).build();
    session.set_field(DISPLAY_NAME, "Ana").unwrap();
    session.set_field(TAGLINE, "x".repeat(101)).unwrap();
    assert!(matches!(session.submit().await, Err(WorkflowError::SubmitBlocked { .. })));
    assert_eq!(session.errors().get(TAGLINE), Some("Tagline must be 100 characters or less"));

    session.discard().unwrap();
    assert!(publisher.current().await.is_none());
    assert_eq!(wiring.navigator.last().unwrap().path(), routes::DASHBOARD);
    assert!(matches!(session.set_field(TAGLINE, "short"), Err(WorkflowError::SessionClosed)));
}
