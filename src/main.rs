use pod_core::BroadcastEventStore;
use podflow::demo::run_episode_demo;
use podflow::{CoreError, CONFIG};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

#[tokio::main]
async fn main() -> Result<(), CoreError> {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env()
                                                  .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")))
                             .init();

    let config = CONFIG.clone();
    info!("podflow demo starting with {}", serde_json::to_string(&config)?);

    // Capa de presentación: escucha los eventos difundidos por la sesión.
    let store = BroadcastEventStore::default();
    let mut rx = store.subscribe();
    let listener = tokio::spawn(async move {
        let mut seen = 0usize;
        loop {
            match rx.recv().await {
                Ok(ev) => {
                    seen += 1;
                    debug!(seq = ev.seq, "event {:?}", ev.kind);
                }
                Err(RecvError::Lagged(n)) => warn!("listener lagged by {n} events"),
                Err(RecvError::Closed) => break,
            }
        }
        seen
    });

    let report = run_episode_demo(&config, store).await?;
    let seen = listener.await.map_err(|e| CoreError::Internal(e.to_string()))?;

    info!(session = %report.session_id,
          episode = %report.episode.id,
          drafts = report.drafts_saved,
          events = report.events.len(),
          received = seen,
          "episode '{}' published", report.episode.title);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
