use pod_core::{BroadcastEventStore, InMemoryEventStore, WorkflowEventKind};
use pod_domain::EpisodeStatus;
use podflow::demo::run_episode_demo;
use podflow::AppConfig;

fn fast_config() -> AppConfig {
    AppConfig { simulated_latency_ms: 0,
                ..AppConfig::default() }
}

#[tokio::test(start_paused = true)]
async fn scripted_session_publishes_after_one_retry() {
    let report = run_episode_demo(&fast_config(), InMemoryEventStore::default()).await
                                                                                .expect("demo runs");

    assert_eq!(report.episode.title, "Lifetimes, Finally");
    assert_eq!(report.episode.status, EpisodeStatus::Published);
    assert_eq!(report.episode.tags, vec!["rust", "lifetimes", "borrowck"]);
    assert_eq!(report.episode.audio.as_ref().map(|a| a.file_name.as_str()), Some("take2.mp3"));
    assert_eq!(report.navigated_to, vec!["/dashboard/episodes".to_string()]);
    assert_eq!(report.drafts_saved, 1);

    let kinds: Vec<&WorkflowEventKind> = report.events.iter().map(|e| &e.kind).collect();
    assert!(kinds.iter().any(|k| matches!(k, WorkflowEventKind::StepBlocked { .. })));
    assert!(kinds.iter().any(|k| matches!(k, WorkflowEventKind::AttachmentRejected { .. })));
    assert!(kinds.iter().any(|k| matches!(k, WorkflowEventKind::AttachmentDiscarded { .. })));
    assert_eq!(kinds.iter().filter(|k| matches!(k, WorkflowEventKind::PublishFailed { .. })).count(), 1);
    assert!(matches!(kinds.last(), Some(WorkflowEventKind::Navigated { .. })));
    // seq contiguo desde 0
    assert!(report.events.iter().enumerate().all(|(i, e)| e.seq == i as u64));
}

#[tokio::test(start_paused = true)]
async fn broadcast_subscriber_sees_every_event() {
    let store = BroadcastEventStore::new(1024);
    let mut rx = store.subscribe();
    let report = run_episode_demo(&fast_config(), store).await.unwrap();
    let mut received = 0;
    while let Ok(ev) = rx.recv().await {
        assert_eq!(ev.seq, received as u64);
        received += 1;
    }
    assert_eq!(received, report.events.len());
}

#[test]
fn rejected_audio_ceiling_from_config_blocks_staging() {
    let cfg = AppConfig { max_audio_bytes: 1024,
                          simulated_latency_ms: 0,
                          ..AppConfig::default() };
    let err = tokio_test::block_on(run_episode_demo(&cfg, InMemoryEventStore::default())).unwrap_err();
    assert!(matches!(err, podflow::CoreError::Workflow(pod_core::WorkflowError::Attachment { .. })));
}
