use chrono::{DateTime, Utc};
use happyhour_core::{parse_deals, Deal, DealSource, SourceResult};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Deals parsed from one fetch of the source
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub deals: Vec<Deal>,
    /// `None` until the first successful refresh
    pub fetched_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    pub fn from_csv(csv: &str) -> Self {
        Self {
            deals: parse_deals(csv),
            fetched_at: Some(Utc::now()),
        }
    }
}

/// Holds the most recent snapshot; a failed refresh keeps the previous one
#[derive(Default)]
pub struct DealStore {
    current: RwLock<Arc<Snapshot>>,
}

impl DealStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with an already parsed snapshot
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    pub async fn snapshot(&self) -> Arc<Snapshot> {
        self.current.read().await.clone()
    }

    /// Fetch, parse and swap in a new snapshot. On failure the previous
    /// snapshot stays and the error goes back to the caller to report.
    pub async fn refresh(&self, source: &dyn DealSource) -> SourceResult<Arc<Snapshot>> {
        let csv = source.fetch_csv().await?;

        let snapshot = Arc::new(Snapshot::from_csv(&csv));
        *self.current.write().await = snapshot.clone();

        info!("Loaded {} deals from {}", snapshot.deals.len(), source.describe());
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use happyhour_core::SourceError;
    use std::sync::Mutex;

    struct ScriptedSource {
        responses: Mutex<Vec<SourceResult<String>>>,
    }

    impl ScriptedSource {
        fn new(mut responses: Vec<SourceResult<String>>) -> Self {
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
            }
        }
    }

    #[async_trait]
    impl DealSource for ScriptedSource {
        async fn fetch_csv(&self) -> SourceResult<String> {
            self.responses
                .lock()
                .unwrap()
                .pop()
                .unwrap_or(Err(SourceError::NotConfigured))
        }

        fn describe(&self) -> String {
            "scripted".to_string()
        }
    }

    #[tokio::test]
    async fn test_starts_empty() {
        let store = DealStore::new();
        let snapshot = store.snapshot().await;
        assert!(snapshot.deals.is_empty());
        assert!(snapshot.fetched_at.is_none());
    }

    #[tokio::test]
    async fn test_refresh_replaces_snapshot() {
        let source = ScriptedSource::new(vec![
            Ok("Venue,City\nRio,Boulder\n".to_string()),
            Ok("Venue,City\nRio,Boulder\nSink,Boulder\n".to_string()),
        ]);
        let store = DealStore::new();

        store.refresh(&source).await.unwrap();
        assert_eq!(store.snapshot().await.deals.len(), 1);

        let refreshed = store.refresh(&source).await.unwrap();
        assert_eq!(refreshed.deals.len(), 2);
        assert_eq!(store.snapshot().await.deals[1].venue, "Sink");
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_deals() {
        let source = ScriptedSource::new(vec![
            Ok("Venue,City\nRio,Boulder\n".to_string()),
            Err(SourceError::Status(503)),
        ]);
        let store = DealStore::new();

        store.refresh(&source).await.unwrap();
        let err = store.refresh(&source).await.unwrap_err();
        assert!(matches!(err, SourceError::Status(503)));

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.deals.len(), 1);
        assert!(snapshot.fetched_at.is_some());
    }

    #[tokio::test]
    async fn test_readers_keep_old_snapshot_alive() {
        let source = ScriptedSource::new(vec![Ok("Venue\nNew\n".to_string())]);
        let store = DealStore::with_snapshot(Snapshot::from_csv("Venue\nOld\n"));

        let before = store.snapshot().await;
        store.refresh(&source).await.unwrap();

        assert_eq!(before.deals[0].venue, "Old");
        assert_eq!(store.snapshot().await.deals[0].venue, "New");
    }
}
