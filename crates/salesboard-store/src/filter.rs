//! Filter construction shared by every store backend
//!
//! A `TransactionFilter` describes which records an operation looks at:
//! - month: `dateOfSale` matches `-0?<month>-` (text match, no date parsing)
//! - search: case-insensitive substring of title, description or price text
//! - price: half-open price range used by the bar chart buckets
//! - sold: exact sale status
//!
//! Backends either translate the filter into their own query language
//! (see `mongo::filter_document`) or evaluate it directly via `compile`.

use crate::error::StoreError;
use crate::model::ProductTransaction;
use regex::Regex;

/// Month selector over the `dateOfSale` text
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MonthFilter {
    month: Option<String>,
}

impl MonthFilter {
    pub fn new(month: Option<&str>) -> Self {
        Self {
            month: month.map(|m| m.to_string()),
        }
    }

    pub fn month(&self) -> Option<&str> {
        self.month.as_deref()
    }

    /// Regex source for the month, or `None` when no month was given.
    ///
    /// The month text is escaped, so `.*` or `1|2` only match literally.
    pub fn pattern(&self) -> Option<String> {
        self.month
            .as_deref()
            .map(|m| format!("-0?{}-", regex::escape(m)))
    }
}

/// Price range `[min, below)`; `below = None` is open-ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub below: Option<f64>,
}

impl PriceRange {
    pub fn new(min: f64, below: Option<f64>) -> Self {
        Self { min, below }
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && self.below.map_or(true, |b| price < b)
    }
}

/// Complete record filter
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransactionFilter {
    pub month: MonthFilter,
    pub search: Option<String>,
    pub price: Option<PriceRange>,
    pub sold: Option<bool>,
}

impl TransactionFilter {
    /// Filter on month only
    pub fn for_month(month: Option<&str>) -> Self {
        Self {
            month: MonthFilter::new(month),
            ..Default::default()
        }
    }

    /// Add a search term; empty terms are ignored
    pub fn with_search(mut self, search: Option<&str>) -> Self {
        self.search = search.filter(|s| !s.is_empty()).map(|s| s.to_string());
        self
    }

    pub fn with_price(mut self, range: PriceRange) -> Self {
        self.price = Some(range);
        self
    }

    pub fn with_sold(mut self, sold: bool) -> Self {
        self.sold = Some(sold);
        self
    }

    /// Escaped, case-sensitivity-free search source (options applied separately)
    pub fn search_pattern(&self) -> Option<String> {
        self.search.as_deref().map(regex::escape)
    }

    /// Build an in-process matcher for this filter
    pub fn compile(&self) -> Result<FilterMatcher, StoreError> {
        let month = match self.month.pattern() {
            Some(pattern) => Some(Regex::new(&pattern)?),
            None => None,
        };
        let search = match self.search_pattern() {
            Some(pattern) => Some(Regex::new(&format!("(?i){}", pattern))?),
            None => None,
        };

        Ok(FilterMatcher {
            month,
            search,
            price: self.price,
            sold: self.sold,
        })
    }
}

/// Compiled form of a `TransactionFilter`
#[derive(Debug)]
pub struct FilterMatcher {
    month: Option<Regex>,
    search: Option<Regex>,
    price: Option<PriceRange>,
    sold: Option<bool>,
}

impl FilterMatcher {
    pub fn matches(&self, tx: &ProductTransaction) -> bool {
        // No month means nothing matches
        let Some(month) = &self.month else {
            return false;
        };
        if !month.is_match(&tx.date_of_sale) {
            return false;
        }

        if let Some(search) = &self.search {
            let hit = search.is_match(&tx.title)
                || search.is_match(&tx.description)
                || tx.price_text().map_or(false, |p| search.is_match(&p));
            if !hit {
                return false;
            }
        }

        if let Some(range) = &self.price {
            if !tx.price.map_or(false, |p| range.contains(p)) {
                return false;
            }
        }

        if let Some(sold) = self.sold {
            if tx.sold != Some(sold) {
                return false;
            }
        }

        true
    }
}

// ==================== Tests ====================
