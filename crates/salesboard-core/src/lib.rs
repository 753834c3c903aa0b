//! Reporting and seeding logic over the product transaction store
//!
//! Each operation turns request parameters into a `TransactionFilter` and
//! runs one or more store calls. Nothing is cached between requests.

pub mod error;
pub mod reports;
pub mod seed;

use salesboard_store::{CategoryCount, ProductTransaction, StoreRef, TransactionFilter};

pub use error::{CoreError, CoreResult, DefaultErrorLogger, ErrorContext, ErrorLogger, ErrorSeverity};
pub use reports::{CombinedData, PriceBucket, PriceRangeCount, Statistics, PRICE_BUCKETS};
pub use seed::{HttpSeedSource, SeedReport, SeedSource, SeedSourceRef, Seeder, SEED_SUCCESS_MESSAGE};

// ==================== Listing Query ====================

/// Parameters of a transaction listing
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionQuery {
    pub month: Option<String>,
    pub search: Option<String>,
    /// 1-based page number
    pub page: u64,
    pub per_page: u64,
}

impl TransactionQuery {
    /// First page of a month with the given page size
    pub fn for_month(month: Option<&str>, per_page: u64) -> Self {
        Self {
            month: month.map(|m| m.to_string()),
            search: None,
            page: 1,
            per_page,
        }
    }

    /// Build from raw request values.
    ///
    /// Unparseable or zero `page`/`per_page` fall back to page 1 and
    /// `default_per_page` instead of failing.
    pub fn from_raw(
        month: Option<&str>,
        search: Option<&str>,
        page: Option<&str>,
        per_page: Option<&str>,
        default_per_page: u64,
    ) -> Self {
        let page = page
            .and_then(|p| p.trim().parse::<u64>().ok())
            .filter(|p| *p > 0)
            .unwrap_or(1);
        let per_page = per_page
            .and_then(|p| p.trim().parse::<u64>().ok())
            .filter(|p| *p > 0)
            .unwrap_or(default_per_page);

        Self {
            month: month.map(|m| m.to_string()),
            search: search.filter(|s| !s.is_empty()).map(|s| s.to_string()),
            page,
            per_page,
        }
    }

    /// Records to skip before this page
    pub fn skip(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }

    pub fn filter(&self) -> TransactionFilter {
        TransactionFilter::for_month(self.month.as_deref()).with_search(self.search.as_deref())
    }
}

// ==================== Reporter ====================

/// Read-side operations shared by every endpoint
#[derive(Clone)]
pub struct Reporter {
    store: StoreRef,
    default_per_page: u64,
}

impl Reporter {
    pub fn new(store: StoreRef, default_per_page: u64) -> Self {
        Self { store, default_per_page }
    }

    pub fn default_per_page(&self) -> u64 {
        self.default_per_page
    }

    /// One page of month-filtered, optionally searched transactions
    pub async fn list_transactions(&self, query: &TransactionQuery) -> CoreResult<Vec<ProductTransaction>> {
        log::debug!(
            "Listing transactions: month={:?} search={:?} page={} per_page={}",
            query.month, query.search, query.page, query.per_page
        );
        Ok(self.store.find(&query.filter(), query.skip(), query.per_page).await?)
    }

    /// Sale amount and sold/unsold counts for a month
    pub async fn statistics(&self, month: Option<&str>) -> CoreResult<Statistics> {
        let filter = TransactionFilter::for_month(month);

        let total_sale_amount = self.store.sum_price(&filter).await?;
        let total_sold_items = self.store.count(&filter.clone().with_sold(true)).await?;
        let total_not_sold_items = self.store.count(&filter.with_sold(false)).await?;

        Ok(Statistics {
            total_sale_amount,
            total_sold_items,
            total_not_sold_items,
        })
    }

    /// Price histogram for a month, one entry per bucket in `PRICE_BUCKETS` order
    pub async fn bar_chart(&self, month: Option<&str>) -> CoreResult<Vec<PriceRangeCount>> {
        let filter = TransactionFilter::for_month(month);
        let mut bars = Vec::with_capacity(PRICE_BUCKETS.len());

        for bucket in PRICE_BUCKETS.iter() {
            let count = self.store.count(&filter.clone().with_price(bucket.range())).await?;
            bars.push(PriceRangeCount {
                range: bucket.label.to_string(),
                count,
            });
        }

        Ok(bars)
    }

    /// Category distribution for a month
    pub async fn pie_chart(&self, month: Option<&str>) -> CoreResult<Vec<CategoryCount>> {
        let filter = TransactionFilter::for_month(month);
        Ok(self.store.count_by_category(&filter).await?)
    }

    /// All four views for a month, computed one after another
    pub async fn combined(&self, month: Option<&str>) -> CoreResult<CombinedData> {
        let query = TransactionQuery::for_month(month, self.default_per_page);

        let transactions = self.list_transactions(&query).await?;
        let statistics = self.statistics(month).await?;
        let bar_chart = self.bar_chart(month).await?;
        let pie_chart = self.pie_chart(month).await?;

        Ok(CombinedData {
            transactions,
            statistics,
            bar_chart,
            pie_chart,
        })
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use salesboard_store::MemoryStore;
    use std::sync::Arc;

    fn record(id: i64, date: &str, price: f64, sold: bool, category: &str) -> ProductTransaction {
        ProductTransaction {
            id: Some(id),
            title: format!("Product {}", id),
            description: format!("Description of product {}", id),
            price: Some(price),
            category: Some(category.to_string()),
            image: String::new(),
            sold: Some(sold),
            date_of_sale: date.to_string(),
        }
    }

    fn scenario_reporter() -> Reporter {
        let store = MemoryStore::with_records(vec![
            record(1, "2024-03-05", 50.0, true, "electronics"),
            record(2, "2024-3-15", 150.0, false, "jewelery"),
            record(3, "2024-04-01", 999.0, true, "electronics"),
        ]);
        Reporter::new(Arc::new(store), 10)
    }

    fn bulk_reporter(n: i64) -> Reporter {
        let records = (1..=n)
            .map(|i| record(i, "2022-07-14T10:00:00+05:30", (i * 37 % 1200) as f64, i % 3 == 0, "misc"))
            .collect();
        Reporter::new(Arc::new(MemoryStore::with_records(records)), 10)
    }

    #[test]
    fn test_query_defaults() {
        let query = TransactionQuery::from_raw(Some("3"), None, None, None, 10);
        assert_eq!(query.page, 1);
        assert_eq!(query.per_page, 10);
        assert_eq!(query.skip(), 0);
    }

    #[test]
    fn test_query_malformed_values_degrade() {
        let query = TransactionQuery::from_raw(Some("3"), Some(""), Some("abc"), Some("-5"), 10);
        assert_eq!(query.page, 1);
        assert_eq!(query.per_page, 10);
        assert_eq!(query.search, None);

        let query = TransactionQuery::from_raw(Some("3"), None, Some("0"), Some("0"), 10);
        assert_eq!(query.page, 1);
        assert_eq!(query.per_page, 10);
    }

    #[test]
    fn test_query_skip() {
        let query = TransactionQuery::from_raw(Some("3"), None, Some("3"), Some("20"), 10);
        assert_eq!(query.skip(), 40);
    }

    #[tokio::test]
    async fn test_scenario_statistics() {
        let stats = scenario_reporter().statistics(Some("3")).await.unwrap();
        assert_eq!(
            stats,
            Statistics { total_sale_amount: 200.0, total_sold_items: 1, total_not_sold_items: 1 }
        );
    }

    #[tokio::test]
    async fn test_scenario_bar_chart() {
        let bars = scenario_reporter().bar_chart(Some("3")).await.unwrap();
        assert_eq!(bars.len(), 10);
        assert_eq!(bars[0], PriceRangeCount { range: "0 - 100".to_string(), count: 1 });
        assert_eq!(bars[1], PriceRangeCount { range: "101 - 200".to_string(), count: 1 });
        assert!(bars[2..].iter().all(|bar| bar.count == 0));
        assert_eq!(bars[9].range, "901 - above");
    }

    #[tokio::test]
    async fn test_scenario_pie_chart() {
        let slices = scenario_reporter().pie_chart(Some("3")).await.unwrap();
        assert_eq!(slices.len(), 2);
        assert!(slices.iter().all(|slice| slice.count == 1));
        assert!(slices.iter().any(|slice| slice.category.as_deref() == Some("electronics")));
        assert!(slices.iter().any(|slice| slice.category.as_deref() == Some("jewelery")));
    }

    #[tokio::test]
    async fn test_bar_chart_counts_cover_month() {
        let reporter = bulk_reporter(60);
        for month in 1..=12 {
            let month = month.to_string();
            let bars = reporter.bar_chart(Some(month.as_str())).await.unwrap();
            let labels: Vec<_> = bars.iter().map(|b| b.range.as_str()).collect();
            let expected: Vec<_> = PRICE_BUCKETS.iter().map(|b| b.label).collect();
            assert_eq!(labels, expected);

            let total: u64 = bars.iter().map(|b| b.count).sum();
            let in_month = if month == "7" { 60 } else { 0 };
            assert_eq!(total, in_month, "month {}", month);
        }
    }

    #[tokio::test]
    async fn test_sold_plus_unsold_equals_month_count() {
        let reporter = bulk_reporter(45);
        let stats = reporter.statistics(Some("07")).await.unwrap();
        assert_eq!(stats.total_sold_items + stats.total_not_sold_items, 45);
        assert_eq!(stats.total_sold_items, 15);
    }

    #[tokio::test]
    async fn test_pagination() {
        let reporter = bulk_reporter(25);

        let page2 = TransactionQuery::from_raw(Some("7"), None, Some("2"), Some("10"), 10);
        let ids: Vec<_> = reporter.list_transactions(&page2).await.unwrap().iter().filter_map(|tx| tx.id).collect();
        assert_eq!(ids, (11..=20).collect::<Vec<_>>());

        let page9 = TransactionQuery::from_raw(Some("7"), None, Some("9"), None, 10);
        assert!(reporter.list_transactions(&page9).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_page_far_past_end_is_empty() {
        let reporter = bulk_reporter(5);
        let query = TransactionQuery::from_raw(Some("7"), None, Some("18446744073709551615"), Some("1000"), 10);
        assert_eq!(query.skip(), u64::MAX);
        assert!(reporter.list_transactions(&query).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_listing() {
        let reporter = scenario_reporter();
        let query = TransactionQuery::from_raw(Some("3"), Some("PRODUCT 2"), None, None, 10);
        let found = reporter.list_transactions(&query).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, Some(2));

        let by_price = TransactionQuery::from_raw(Some("3"), Some("150"), None, None, 10);
        assert_eq!(reporter.list_transactions(&by_price).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_month_is_empty_not_error() {
        let reporter = scenario_reporter();
        let query = TransactionQuery::from_raw(Some("13"), None, None, None, 10);
        assert!(reporter.list_transactions(&query).await.unwrap().is_empty());

        let stats = reporter.statistics(Some("13")).await.unwrap();
        assert_eq!(stats.total_sale_amount, 0.0);
        assert_eq!(stats.total_sold_items + stats.total_not_sold_items, 0);

        assert!(reporter.pie_chart(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_combined_matches_individual_operations() {
        let reporter = scenario_reporter();
        let combined = reporter.combined(Some("3")).await.unwrap();

        assert_eq!(combined.transactions.len(), 2);
        assert_eq!(combined.statistics, reporter.statistics(Some("3")).await.unwrap());
        assert_eq!(combined.bar_chart, reporter.bar_chart(Some("3")).await.unwrap());
        assert_eq!(combined.pie_chart, reporter.pie_chart(Some("3")).await.unwrap());
    }
}
