//! Storage contract for client records
//!
//! Indices are 0-based positions into a full-table read. The worksheet
//! itself is 1-based with a header row, so record N lives at storage
//! row N+2; implementations own that offset.

use anyhow::Result;
use async_trait::async_trait;

use super::models::ClientRecord;

#[async_trait]
pub trait RecordStore {
    /// Append one record as the new last row
    async fn append(&self, record: &ClientRecord) -> Result<()>;

    /// Every data row, excluding the header, in storage order
    async fn read_all(&self) -> Result<Vec<ClientRecord>>;

    /// Overwrite all columns of the record at `index` in one batched call
    async fn update(&self, index: usize, record: &ClientRecord) -> Result<()>;

    /// Remove the record at `index`; later records shift up by one,
    /// invalidating previously captured indices
    async fn delete(&self, index: usize) -> Result<()>;
}


#[cfg(test)]
mod tests {
    use super::testing::InMemoryStore;
    use super::*;

    fn record(name: &str, cost: f64, sell: f64) -> ClientRecord {
        let mut record = ClientRecord {
            name: name.into(),
            phone: "+355691234567".into(),
            start_date: "2025-01-01".into(),
            link: String::new(),
            end_date: "2026-01-01".into(),
            mac: "00:1A:2B:3C:4D:5E".into(),
            cost,
            sell,
            profit: 0.0,
        };
        record.recompute_profit();
        record
    }

    #[tokio::test]
    async fn test_append_adds_as_last_entry() {
        let store = InMemoryStore::default();
        store.append(&record("Alba", 5.0, 10.0)).await.unwrap();
        store.append(&record("Besa", 4.0, 8.0)).await.unwrap();

        let all = store.read_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all.last().unwrap().name, "Besa");
    }

    #[tokio::test]
    async fn test_delete_shifts_later_records_up() {
        let store = InMemoryStore::default();
        for name in ["Alba", "Besa", "Cen"] {
            store.append(&record(name, 5.0, 10.0)).await.unwrap();
        }

        store.delete(1).await.unwrap();

        let all = store.read_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Alba");
        assert_eq!(all[1].name, "Cen");
    }

    #[tokio::test]
    async fn test_update_changes_only_that_position() {
        let store = InMemoryStore::default();
        for name in ["Alba", "Besa", "Cen"] {
            store.append(&record(name, 5.0, 10.0)).await.unwrap();
        }

        store.update(1, &record("Besa", 6.0, 9.0)).await.unwrap();

        let all = store.read_all().await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0], record("Alba", 5.0, 10.0));
        assert_eq!(all[1].cost, 6.0);
        assert_eq!(all[1].profit, 3.0);
        assert_eq!(all[2], record("Cen", 5.0, 10.0));
    }

    #[tokio::test]
    async fn test_out_of_range_index_is_an_error() {
        let store = InMemoryStore::default();
        store.append(&record("Alba", 5.0, 10.0)).await.unwrap();

        assert!(store.update(1, &record("Besa", 1.0, 2.0)).await.is_err());
        assert!(store.delete(5).await.is_err());
    }
}
