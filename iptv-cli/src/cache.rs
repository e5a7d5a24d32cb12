//! Read-through snapshot cache over the full-table read
//!
//! The snapshot is reused for up to 30 seconds; every successful
//! mutation must call `invalidate()` so the next read is fresh.

use std::time::{Duration, Instant};

use anyhow::Result;

use crate::api::{ClientRecord, RecordStore};

pub const DEFAULT_TTL: Duration = Duration::from_secs(30);

pub struct SnapshotCache {
    ttl: Duration,
    entry: Option<(Instant, Vec<ClientRecord>)>,
}

impl Default for SnapshotCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl SnapshotCache {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    /// The cached snapshot, or a fresh full-table read if the snapshot
    /// is missing or older than the TTL
    pub async fn records(&mut self, store: &dyn RecordStore) -> Result<&[ClientRecord]> {
        if !self.is_fresh() {
            log::debug!("Snapshot stale or missing, reading all records");
            let records = store.read_all().await?;
            self.entry = Some((Instant::now(), records));
        }

        Ok(self
            .entry
            .as_ref()
            .map(|(_, records)| records.as_slice())
            .unwrap_or(&[]))
    }

    /// Drop the snapshot immediately. Called after every mutation.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    fn is_fresh(&self) -> bool {
        self.entry
            .as_ref()
            .is_some_and(|(stored_at, _)| stored_at.elapsed() < self.ttl)
    }

    #[cfg(test)]
    fn peek(&self) -> Option<&[ClientRecord]> {
        self.is_fresh()
            .then(|| self.entry.as_ref().map(|(_, records)| records.as_slice()))
            .flatten()
    }

    #[cfg(test)]
    fn put(&mut self, records: Vec<ClientRecord>) {
        self.entry = Some((Instant::now(), records));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Vec<ClientRecord> {
        vec![ClientRecord {
            name: "Alba".into(),
            phone: String::new(),
            start_date: "2025-01-01".into(),
            link: String::new(),
            end_date: "2026-01-01".into(),
            mac: String::new(),
            cost: 5.0,
            sell: 10.0,
            profit: 5.0,
        }]
    }

    #[test]
    fn test_fresh_cache_is_empty() {
        let cache = SnapshotCache::default();
        assert!(cache.peek().is_none());
    }

    #[test]
    fn test_snapshot_survives_within_ttl() {
        let mut cache = SnapshotCache::default();
        cache.put(snapshot());
        assert_eq!(cache.peek().unwrap().len(), 1);
    }

    #[test]
    fn test_invalidate_drops_snapshot() {
        let mut cache = SnapshotCache::default();
        cache.put(snapshot());
        cache.invalidate();
        assert!(cache.peek().is_none());
    }

    #[test]
    fn test_expired_snapshot_is_not_returned() {
        let mut cache = SnapshotCache::new(Duration::ZERO);
        cache.put(snapshot());
        assert!(cache.peek().is_none());
    }

    #[tokio::test]
    async fn test_read_through_fills_and_reuses() {
        use crate::api::store::testing::InMemoryStore;

        let store = InMemoryStore::default();
        store.append(&snapshot()[0]).await.unwrap();

        let mut cache = SnapshotCache::default();
        assert_eq!(cache.records(&store).await.unwrap().len(), 1);

        // A write the cache has not been told about is invisible until
        // the snapshot is invalidated.
        store.append(&snapshot()[0]).await.unwrap();
        assert_eq!(cache.records(&store).await.unwrap().len(), 1);

        cache.invalidate();
        assert_eq!(cache.records(&store).await.unwrap().len(), 2);
    }
}
