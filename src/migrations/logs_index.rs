use async_trait::async_trait;
use tracing::info;

use super::Migration;
use crate::{
    error::StoreError,
    store::{DocumentStore, IndexSpec},
};

pub const LOGS_COLLECTION: &str = "logs";

/// Newest-first index on `logs.timestamp`.
pub struct LogsTimestampIndex;

impl LogsTimestampIndex {
    pub fn index() -> IndexSpec {
        IndexSpec::descending("timestamp")
    }
}

#[async_trait]
impl Migration for LogsTimestampIndex {
    fn id(&self) -> &'static str {
        "20240101000000-logs-timestamp-index"
    }

    async fn up(&self, store: &dyn DocumentStore) -> Result<(), StoreError> {
        let name = store.create_index(LOGS_COLLECTION, &Self::index()).await?;
        info!("Created index {name} on {LOGS_COLLECTION}");
        Ok(())
    }

    async fn down(&self, store: &dyn DocumentStore) -> Result<(), StoreError> {
        let name = Self::index().name();
        store.drop_index(LOGS_COLLECTION, &name).await?;
        info!("Dropped index {name} from {LOGS_COLLECTION}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn up_is_idempotent() {
        let store = MemoryStore::new();
        LogsTimestampIndex.up(&store).await.unwrap();
        LogsTimestampIndex.up(&store).await.unwrap();

        assert_eq!(store.index_names(LOGS_COLLECTION).await.unwrap(), ["timestamp_-1"]);
    }

    #[tokio::test]
    async fn down_removes_the_index_and_tolerates_absence() {
        let store = MemoryStore::new();
        LogsTimestampIndex.up(&store).await.unwrap();
        LogsTimestampIndex.down(&store).await.unwrap();
        assert!(store.index_names(LOGS_COLLECTION).await.unwrap().is_empty());

        LogsTimestampIndex.down(&store).await.unwrap();
    }

    #[tokio::test]
    async fn opposite_direction_is_a_separate_index() {
        let store = MemoryStore::new();
        store.create_index(LOGS_COLLECTION, &IndexSpec::ascending("timestamp")).await.unwrap();

        LogsTimestampIndex.up(&store).await.unwrap();
        assert_eq!(
            store.index_names(LOGS_COLLECTION).await.unwrap(),
            ["timestamp_1", "timestamp_-1"]
        );
    }
}
