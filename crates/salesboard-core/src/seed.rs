//! Seeding the store from a remote JSON array
//!
//! `initialize` fetches first, then deletes and bulk-inserts. A fetch
//! failure leaves the collection untouched; an insert failure after the
//! delete leaves it empty. There is no rollback.

use crate::error::{CoreError, CoreResult};
use async_trait::async_trait;
use salesboard_config::SeedConfig;
use salesboard_store::{ProductTransaction, StoreRef};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Message returned to clients after a successful seed
pub const SEED_SUCCESS_MESSAGE: &str = "Database initialized with seed data.";

/// Where seed records come from
#[async_trait]
pub trait SeedSource: Send + Sync {
    /// Fetch the full dataset
    async fn fetch(&self) -> CoreResult<Vec<ProductTransaction>>;

    /// Human-readable origin for logs
    fn describe(&self) -> String;
}

/// Seed source reference type
pub type SeedSourceRef = Arc<dyn SeedSource>;

/// Fetches the dataset over HTTP
#[derive(Debug, Clone)]
pub struct HttpSeedSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSeedSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn from_config(config: &SeedConfig) -> Self {
        Self::new(config.url.clone())
    }
}

#[async_trait]
impl SeedSource for HttpSeedSource {
    async fn fetch(&self) -> CoreResult<Vec<ProductTransaction>> {
        let response = self.client.get(&self.url).send().await?.error_for_status()?;
        let records = response.json::<Vec<ProductTransaction>>().await?;
        Ok(records)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Outcome of a seed run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedReport {
    pub deleted: u64,
    pub inserted: u64,
}

/// Replaces the collection with the seed dataset
#[derive(Clone)]
pub struct Seeder {
    source: SeedSourceRef,
    store: StoreRef,
}

impl Seeder {
    pub fn new(source: SeedSourceRef, store: StoreRef) -> Self {
        Self { source, store }
    }

    /// Fetch, delete everything, insert the fetched records
    pub async fn initialize(&self) -> CoreResult<SeedReport> {
        log::info!("Fetching seed data from {}", self.source.describe());
        let records = self.source.fetch().await?;
        log::debug!("Fetched {} seed records", records.len());

        let deleted = self.store.delete_all().await?;
        let inserted = self.store.insert_many(records).await.map_err(|e| {
            log::error!("Insert failed after deleting {} records; collection left empty", deleted);
            CoreError::from(e)
        })?;

        log::info!("Seed complete: {} deleted, {} inserted", deleted, inserted);
        Ok(SeedReport { deleted, inserted })
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use salesboard_store::{
        CategoryCount, MemoryStore, StoreError, TransactionFilter, TransactionStore,
    };

    struct StaticSource(Vec<ProductTransaction>);

    #[async_trait]
    impl SeedSource for StaticSource {
        async fn fetch(&self) -> CoreResult<Vec<ProductTransaction>> {
            Ok(self.0.clone())
        }

        fn describe(&self) -> String {
            "static".to_string()
        }
    }

    struct UnreachableSource;

    #[async_trait]
    impl SeedSource for UnreachableSource {
        async fn fetch(&self) -> CoreResult<Vec<ProductTransaction>> {
            Err(CoreError::SeedFetch { message: "connection refused".to_string() })
        }

        fn describe(&self) -> String {
            "unreachable".to_string()
        }
    }

    /// Memory store whose inserts always fail
    struct ReadOnlyStore(MemoryStore);

    #[async_trait]
    impl TransactionStore for ReadOnlyStore {
        async fn delete_all(&self) -> Result<u64, StoreError> {
            self.0.delete_all().await
        }

        async fn insert_many(&self, _transactions: Vec<ProductTransaction>) -> Result<u64, StoreError> {
            Err(StoreError::UnexpectedResult { message: "write rejected".to_string() })
        }

        async fn find(&self, filter: &TransactionFilter, skip: u64, limit: u64) -> Result<Vec<ProductTransaction>, StoreError> {
            self.0.find(filter, skip, limit).await
        }

        async fn count(&self, filter: &TransactionFilter) -> Result<u64, StoreError> {
            self.0.count(filter).await
        }

        async fn sum_price(&self, filter: &TransactionFilter) -> Result<f64, StoreError> {
            self.0.sum_price(filter).await
        }

        async fn count_by_category(&self, filter: &TransactionFilter) -> Result<Vec<CategoryCount>, StoreError> {
            self.0.count_by_category(filter).await
        }
    }

    fn dated(id: i64, date: &str) -> ProductTransaction {
        ProductTransaction {
            id: Some(id),
            date_of_sale: date.to_string(),
            ..Default::default()
        }
    }

    async fn all_ids(store: &dyn TransactionStore) -> Vec<i64> {
        let mut ids = Vec::new();
        for month in 1..=12 {
            let month = month.to_string();
            let filter = TransactionFilter::for_month(Some(month.as_str()));
            ids.extend(store.find(&filter, 0, 1000).await.unwrap().iter().filter_map(|tx| tx.id));
        }
        ids.sort();
        ids
    }

    #[tokio::test]
    async fn test_seed_twice_keeps_latest_dataset() {
        let store: StoreRef = Arc::new(MemoryStore::new());

        let first = Seeder::new(
            Arc::new(StaticSource(vec![dated(1, "2024-01-02"), dated(2, "2024-02-03")])),
            store.clone(),
        );
        let report = first.initialize().await.unwrap();
        assert_eq!(report, SeedReport { deleted: 0, inserted: 2 });

        let second = Seeder::new(Arc::new(StaticSource(vec![dated(7, "2024-05-06")])), store.clone());
        let report = second.initialize().await.unwrap();
        assert_eq!(report, SeedReport { deleted: 2, inserted: 1 });

        assert_eq!(all_ids(store.as_ref()).await, vec![7]);
    }

    #[tokio::test]
    async fn test_fetch_failure_leaves_collection_untouched() {
        let store: StoreRef = Arc::new(MemoryStore::with_records(vec![dated(1, "2024-01-02")]));
        let seeder = Seeder::new(Arc::new(UnreachableSource), store.clone());

        let err = seeder.initialize().await.unwrap_err();
        assert!(matches!(err, CoreError::SeedFetch { .. }));
        assert_eq!(all_ids(store.as_ref()).await, vec![1]);
    }

    #[tokio::test]
    async fn test_insert_failure_leaves_collection_empty() {
        let inner = MemoryStore::with_records(vec![dated(1, "2024-01-02")]);
        let store: StoreRef = Arc::new(ReadOnlyStore(inner));
        let seeder = Seeder::new(Arc::new(StaticSource(vec![dated(2, "2024-02-03")])), store.clone());

        let err = seeder.initialize().await.unwrap_err();
        assert!(matches!(err, CoreError::Store(_)));
        assert!(all_ids(store.as_ref()).await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_dataset_empties_collection() {
        let store: StoreRef = Arc::new(MemoryStore::with_records(vec![dated(1, "2024-01-02")]));
        let seeder = Seeder::new(Arc::new(StaticSource(Vec::new())), store.clone());

        let report = seeder.initialize().await.unwrap();
        assert_eq!(report, SeedReport { deleted: 1, inserted: 0 });
        assert!(all_ids(store.as_ref()).await.is_empty());
    }

    #[test]
    fn test_http_source_from_config() {
        let source = HttpSeedSource::from_config(&SeedConfig::default());
        assert_eq!(source.describe(), "https://s3.amazonaws.com/roxiler.com/product_transaction.json");
    }
}
