//! Product transaction storage
//!
//! The store is an opaque document collection exposing query and
//! aggregation capability through `TransactionStore`.

use async_trait::async_trait;
use salesboard_config::{DatabaseConfig, StoreBackend};
use std::sync::Arc;

pub mod error;
pub mod filter;
pub mod memory;
pub mod model;
pub mod mongo;

pub use error::StoreError;
pub use filter::{FilterMatcher, MonthFilter, PriceRange, TransactionFilter};
pub use memory::MemoryStore;
pub use model::{CategoryCount, ProductTransaction};
pub use mongo::MongoStore;

// ==================== Store Trait ====================

/// Store reference type
pub type StoreRef = Arc<dyn TransactionStore>;

/// Query and aggregation capability over the transaction collection
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Remove every record, returning how many were removed
    async fn delete_all(&self) -> Result<u64, StoreError>;

    /// Append records verbatim, returning how many were inserted
    async fn insert_many(&self, transactions: Vec<ProductTransaction>) -> Result<u64, StoreError>;

    /// Matching records in store order, after skipping `skip`, at most `limit`
    async fn find(
        &self,
        filter: &TransactionFilter,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<ProductTransaction>, StoreError>;

    /// Number of matching records
    async fn count(&self, filter: &TransactionFilter) -> Result<u64, StoreError>;

    /// Sum of `price` over matching records, 0 when none match
    async fn sum_price(&self, filter: &TransactionFilter) -> Result<f64, StoreError>;

    /// Matching records grouped by category
    async fn count_by_category(&self, filter: &TransactionFilter) -> Result<Vec<CategoryCount>, StoreError>;
}

/// Open the store selected by the configuration
pub async fn open_store(config: &DatabaseConfig) -> Result<StoreRef, StoreError> {
    match config.backend {
        StoreBackend::Mongodb => Ok(Arc::new(MongoStore::connect(config).await?)),
        StoreBackend::Memory => {
            log::warn!("Using in-memory store; data is lost on exit");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
