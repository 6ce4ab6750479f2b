use chrono::{Duration, Utc};
use pod_core::{AttachmentDescriptor, AttachmentKind, AttachmentMetadata, AttachmentUpload, FieldValue, FormSnapshot};
use pod_domain::fields::*;
use pod_domain::{CatalogError, CatalogRepository, Episode, EpisodeQuery, EpisodeStatus, InMemoryCatalog,
                 SortDirection, SortKey};
use uuid::Uuid;

fn titles(list: &[Episode]) -> Vec<&str> {
    list.iter().map(|e| e.title.as_str()).collect()
}

#[tokio::test]
async fn filter_by_status_and_search() {
    let (catalog, _) = InMemoryCatalog::seeded();
    let published = catalog.list_episodes(&EpisodeQuery::new().status(EpisodeStatus::Published)).await;
    assert_eq!(published.len(), 2);
    assert!(published.iter().all(|e| e.status == EpisodeStatus::Published));

    // La búsqueda también mira los tags, sin distinguir mayúsculas.
    let by_tag = catalog.list_episodes(&EpisodeQuery::new().search("TOKIO")).await;
    assert_eq!(titles(&by_tag), vec!["Async in Practice"]);

    let blank = catalog.list_episodes(&EpisodeQuery::new().search("   ")).await;
    assert_eq!(blank.len(), 3);
}

#[tokio::test]
async fn header_click_toggles_direction() {
    let (catalog, _) = InMemoryCatalog::seeded();
    let mut query = EpisodeQuery::new();
    query.toggle_sort(SortKey::Plays);
    assert_eq!(query.direction, SortDirection::Desc);
    let desc = catalog.list_episodes(&query).await;
    assert_eq!(titles(&desc), vec!["Async in Practice", "Ownership Explained", "Unsafe Without Fear"]);

    query.toggle_sort(SortKey::Plays);
    assert_eq!(query.direction, SortDirection::Asc);
    let asc = catalog.list_episodes(&query).await;
    assert_eq!(titles(&asc), vec!["Unsafe Without Fear", "Ownership Explained", "Async in Practice"]);

    query.toggle_sort(SortKey::Title);
    assert_eq!((query.sort, query.direction), (SortKey::Title, SortDirection::Desc));
}

#[tokio::test]
async fn published_snapshot_lands_in_catalog() {
    let (catalog, podcast) = InMemoryCatalog::seeded();
    let audio = AttachmentDescriptor::from_upload(AttachmentKind::Audio,
                                                  AttachmentUpload::new("ep4.mp3", "audio/mpeg", 10_000_000),
                                                  AttachmentMetadata { duration_ms: Some(625_000),
                                                                       preview_handle: None,
                                                                       dimensions: None });
    let snap: FormSnapshot = vec![(PODCAST_ID.to_string(), FieldValue::from(podcast.to_string())),
                                  (TITLE.to_string(), FieldValue::from("  Traits Deep Dive ")),
                                  (DESCRIPTION.to_string(), FieldValue::from("Dyn vs generics")),
                                  (EPISODE_NUMBER.to_string(), FieldValue::from("4")),
                                  (SEASON_NUMBER.to_string(), FieldValue::from("")),
                                  (AUDIO_FILE.to_string(), FieldValue::Attachment(audio)),
                                  (TAGS.to_string(), FieldValue::from(vec!["traits", "generics"]))].into_iter()
                                                                                                   .collect();
    let now = Utc::now();
    let episode = Episode::from_snapshot(Uuid::new_v4(), podcast, &snap, now).unwrap();
    assert_eq!(episode.title, "Traits Deep Dive");
    assert_eq!(episode.episode_number, Some(4));
    assert_eq!(episode.season_number, None);
    assert_eq!(episode.duration_ms, 625_000);
    assert_eq!(episode.status, EpisodeStatus::Published);
    catalog.insert_episode(episode.clone()).await.unwrap();

    let newest = catalog.list_episodes(&EpisodeQuery::new().podcast(podcast)).await;
    assert_eq!(newest[0].id, episode.id);
    assert!(newest[0].published_at.unwrap() > now - Duration::seconds(1));
}

#[test]
fn non_numeric_episode_number_is_invalid_snapshot() {
    let snap: FormSnapshot = vec![(TITLE.to_string(), FieldValue::from("x")),
                                  (EPISODE_NUMBER.to_string(), FieldValue::from("four"))].into_iter()
                                                                                         .collect();
    let res = Episode::from_snapshot(Uuid::new_v4(), Uuid::new_v4(), &snap, Utc::now());
    assert!(matches!(res, Err(CatalogError::InvalidSnapshot(_))));
}

#[test]
fn query_serializes_with_snake_case_keys() {
    let q = EpisodeQuery::new().sort_by(SortKey::PublishedAt, SortDirection::Asc);
    let json = serde_json::to_value(&q).unwrap();
    assert_eq!(json["sort"], "published_at");
    assert_eq!(json["direction"], "asc");
}
