//! In-process store keeping records in insertion order

use crate::error::StoreError;
use crate::filter::TransactionFilter;
use crate::model::{CategoryCount, ProductTransaction};
use crate::TransactionStore;
use async_trait::async_trait;
use std::sync::RwLock;

/// Vector-backed store. Used for tests and the `memory` backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<ProductTransaction>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `records`
    pub fn with_records(records: Vec<ProductTransaction>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    fn matching(&self, filter: &TransactionFilter) -> Result<Vec<ProductTransaction>, StoreError> {
        let matcher = filter.compile()?;
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records.iter().filter(|tx| matcher.matches(tx)).cloned().collect())
    }
}

#[async_trait]
impl TransactionStore for MemoryStore {
    async fn delete_all(&self) -> Result<u64, StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        let removed = records.len() as u64;
        records.clear();
        Ok(removed)
    }

    async fn insert_many(&self, transactions: Vec<ProductTransaction>) -> Result<u64, StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        let inserted = transactions.len() as u64;
        records.extend(transactions);
        Ok(inserted)
    }

    async fn find(
        &self,
        filter: &TransactionFilter,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<ProductTransaction>, StoreError> {
        Ok(self
            .matching(filter)?
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self, filter: &TransactionFilter) -> Result<u64, StoreError> {
        Ok(self.matching(filter)?.len() as u64)
    }

    async fn sum_price(&self, filter: &TransactionFilter) -> Result<f64, StoreError> {
        Ok(self.matching(filter)?.iter().filter_map(|tx| tx.price).sum())
    }

    async fn count_by_category(&self, filter: &TransactionFilter) -> Result<Vec<CategoryCount>, StoreError> {
        let mut groups: Vec<CategoryCount> = Vec::new();

        for tx in self.matching(filter)? {
            match groups.iter_mut().find(|group| group.category == tx.category) {
                Some(group) => group.count += 1,
                None => groups.push(CategoryCount { category: tx.category, count: 1 }),
            }
        }

        Ok(groups)
    }
}

// ==================== Tests ====================
