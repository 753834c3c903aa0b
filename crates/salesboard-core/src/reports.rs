//! Report structures for API responses

use salesboard_store::{CategoryCount, PriceRange, ProductTransaction};
use serde::{Deserialize, Serialize};

/// Sale totals for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_sale_amount: f64,
    pub total_sold_items: u64,
    pub total_not_sold_items: u64,
}

/// One bar of the price histogram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRangeCount {
    pub range: String,
    pub count: u64,
}

/// Everything the combined view shows for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedData {
    pub transactions: Vec<ProductTransaction>,
    pub statistics: Statistics,
    pub bar_chart: Vec<PriceRangeCount>,
    pub pie_chart: Vec<CategoryCount>,
}

/// A fixed histogram bucket
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBucket {
    pub label: &'static str,
    pub min: f64,
    /// Lower bound of the next bucket; `None` for the last one
    pub below: Option<f64>,
}

impl PriceBucket {
    pub fn range(&self) -> PriceRange {
        PriceRange::new(self.min, self.below)
    }
}

/// Bar chart buckets in display order.
///
/// Labels name inclusive integer ranges; a price belongs to a bucket when
/// `min <= price < below`, so fractional prices between two labels land in
/// the lower one.
pub const PRICE_BUCKETS: [PriceBucket; 10] = [
    PriceBucket { label: "0 - 100", min: 0.0, below: Some(101.0) },
    PriceBucket { label: "101 - 200", min: 101.0, below: Some(201.0) },
    PriceBucket { label: "201 - 300", min: 201.0, below: Some(301.0) },
    PriceBucket { label: "301 - 400", min: 301.0, below: Some(401.0) },
    PriceBucket { label: "401 - 500", min: 401.0, below: Some(501.0) },
    PriceBucket { label: "501 - 600", min: 501.0, below: Some(601.0) },
    PriceBucket { label: "601 - 700", min: 601.0, below: Some(701.0) },
    PriceBucket { label: "701 - 800", min: 701.0, below: Some(801.0) },
    PriceBucket { label: "801 - 900", min: 801.0, below: Some(901.0) },
    PriceBucket { label: "901 - above", min: 901.0, below: None },
];
