//! MongoDB-backed store
//!
//! Filters are translated into query documents; statistics and the
//! category distribution run as aggregation pipelines on the server.

use crate::error::StoreError;
use crate::filter::TransactionFilter;
use crate::model::{CategoryCount, ProductTransaction};
use crate::TransactionStore;
use async_trait::async_trait;
use mongodb::bson::{doc, Bson, Document};
use mongodb::options::{ClientOptions, FindOptions};
use mongodb::{Client, Collection};
use salesboard_config::DatabaseConfig;

/// Store over a single MongoDB collection
#[derive(Debug, Clone)]
pub struct MongoStore {
    collection: Collection<ProductTransaction>,
}

impl MongoStore {
    /// Connect and ping the server so start-up fails fast when it is unreachable
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let options = ClientOptions::parse(&config.uri).await?;
        let client = Client::with_options(options)?;
        let database = client.database(&config.name);

        database
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| StoreError::ConnectionFailed { message: e.to_string() })?;

        log::info!(
            "Connected to MongoDB database '{}' (collection '{}')",
            config.name,
            config.collection
        );

        Ok(Self {
            collection: database.collection(&config.collection),
        })
    }
}

/// Translate a filter into a MongoDB query document
pub fn filter_document(filter: &TransactionFilter) -> Document {
    let mut document = match filter.month.pattern() {
        Some(pattern) => doc! { "dateOfSale": { "$regex": pattern } },
        // An empty `$in` matches no document
        None => doc! { "dateOfSale": { "$in": Bson::Array(Vec::new()) } },
    };

    if let Some(pattern) = filter.search_pattern() {
        document.insert(
            "$or",
            vec![
                doc! { "title": { "$regex": pattern.clone(), "$options": "i" } },
                doc! { "description": { "$regex": pattern.clone(), "$options": "i" } },
                doc! {
                    "$expr": {
                        "$regexMatch": {
                            "input": { "$toString": "$price" },
                            "regex": pattern,
                            "options": "i",
                        }
                    }
                },
            ],
        );
    }

    if let Some(range) = filter.price {
        let mut bounds = doc! { "$gte": range.min };
        if let Some(below) = range.below {
            bounds.insert("$lt", below);
        }
        document.insert("price", bounds);
    }

    if let Some(sold) = filter.sold {
        document.insert("sold", sold);
    }

    document
}

/// Skip/limit options for `find`. The driver sends both as signed 64-bit
/// integers, so larger values are clamped.
fn page_options(skip: u64, limit: u64) -> FindOptions {
    let max = i64::MAX as u64;
    FindOptions::builder()
        .skip(skip.min(max))
        .limit(limit.min(max) as i64)
        .build()
}

fn bson_number(value: Option<&Bson>) -> Result<f64, StoreError> {
    match value {
        Some(Bson::Double(v)) => Ok(*v),
        Some(Bson::Int32(v)) => Ok(*v as f64),
        Some(Bson::Int64(v)) => Ok(*v as f64),
        Some(Bson::Null) | None => Ok(0.0),
        Some(other) => Err(StoreError::UnexpectedResult {
            message: format!("expected a number, got {}", other),
        }),
    }
}

#[async_trait]
impl TransactionStore for MongoStore {
    async fn delete_all(&self) -> Result<u64, StoreError> {
        let result = self.collection.delete_many(doc! {}, None).await?;
        Ok(result.deleted_count)
    }

    async fn insert_many(&self, transactions: Vec<ProductTransaction>) -> Result<u64, StoreError> {
        // The driver rejects an empty batch
        if transactions.is_empty() {
            return Ok(0);
        }
        let result = self.collection.insert_many(transactions, None).await?;
        Ok(result.inserted_ids.len() as u64)
    }

    async fn find(
        &self,
        filter: &TransactionFilter,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<ProductTransaction>, StoreError> {
        let mut cursor = self
            .collection
            .find(filter_document(filter), page_options(skip, limit))
            .await?;
        let mut transactions = Vec::new();
        while cursor.advance().await? {
            transactions.push(cursor.deserialize_current()?);
        }
        Ok(transactions)
    }

    async fn count(&self, filter: &TransactionFilter) -> Result<u64, StoreError> {
        Ok(self.collection.count_documents(filter_document(filter), None).await?)
    }

    async fn sum_price(&self, filter: &TransactionFilter) -> Result<f64, StoreError> {
        let pipeline = vec![
            doc! { "$match": filter_document(filter) },
            doc! { "$group": { "_id": Bson::Null, "total": { "$sum": "$price" } } },
        ];

        let mut cursor = self.collection.aggregate(pipeline, None).await?;
        if cursor.advance().await? {
            let group = cursor.deserialize_current()?;
            return bson_number(group.get("total"));
        }
        Ok(0.0)
    }

    async fn count_by_category(&self, filter: &TransactionFilter) -> Result<Vec<CategoryCount>, StoreError> {
        let pipeline = vec![
            doc! { "$match": filter_document(filter) },
            doc! { "$group": { "_id": "$category", "count": { "$sum": 1 } } },
        ];

        let mut cursor = self.collection.aggregate(pipeline, None).await?;
        let mut groups = Vec::new();
        while cursor.advance().await? {
            let group = cursor.deserialize_current()?;
            let category = match group.get("_id") {
                Some(Bson::String(name)) => Some(name.clone()),
                Some(Bson::Null) | None => None,
                Some(other) => Some(other.to_string()),
            };
            let count = bson_number(group.get("count"))? as u64;
            groups.push(CategoryCount { category, count });
        }
        Ok(groups)
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::PriceRange;

    #[test]
    fn test_page_options_clamp_to_signed_range() {
        let options = page_options(20, 10);
        assert_eq!(options.skip, Some(20));
        assert_eq!(options.limit, Some(10));

        let options = page_options(u64::MAX, u64::MAX);
        assert_eq!(options.skip, Some(i64::MAX as u64));
        assert_eq!(options.limit, Some(i64::MAX));
    }

    #[test]
    fn test_month_only_document() {
        let filter = TransactionFilter::for_month(Some("3"));
        assert_eq!(filter_document(&filter), doc! { "dateOfSale": { "$regex": "-0?3-" } });
    }

    #[test]
    fn test_missing_month_document_matches_nothing() {
        let filter = TransactionFilter::for_month(None);
        assert_eq!(
            filter_document(&filter),
            doc! { "dateOfSale": { "$in": Bson::Array(Vec::new()) } }
        );
    }

    #[test]
    fn test_search_document() {
        let filter = TransactionFilter::for_month(Some("11")).with_search(Some("usb+"));
        let document = filter_document(&filter);

        let clauses = document.get_array("$or").unwrap();
        assert_eq!(clauses.len(), 3);
        assert_eq!(
            clauses[0],
            Bson::Document(doc! { "title": { "$regex": "usb\\+", "$options": "i" } })
        );
        assert!(document.get_document("dateOfSale").is_ok());
    }

    #[test]
    fn test_price_bucket_document() {
        let bounded = TransactionFilter::for_month(Some("3")).with_price(PriceRange::new(101.0, Some(201.0)));
        assert_eq!(
            filter_document(&bounded),
            doc! {
                "dateOfSale": { "$regex": "-0?3-" },
                "price": { "$gte": 101.0, "$lt": 201.0 },
            }
        );

        let open = TransactionFilter::for_month(Some("3")).with_price(PriceRange::new(901.0, None));
        assert_eq!(
            filter_document(&open).get_document("price").unwrap(),
            &doc! { "$gte": 901.0 }
        );
    }

    #[test]
    fn test_sold_document() {
        let filter = TransactionFilter::for_month(Some("3")).with_sold(false);
        assert_eq!(filter_document(&filter).get_bool("sold").unwrap(), false);
    }

    #[test]
    fn test_bson_number() {
        assert_eq!(bson_number(Some(&Bson::Int32(3))).unwrap(), 3.0);
        assert_eq!(bson_number(Some(&Bson::Double(2.5))).unwrap(), 2.5);
        assert_eq!(bson_number(None).unwrap(), 0.0);
        assert!(bson_number(Some(&Bson::String("x".to_string()))).is_err());
    }
}
