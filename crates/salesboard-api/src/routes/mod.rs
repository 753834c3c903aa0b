//! Route modules for the API server
//!
//! - transactions: paginated, searchable listing for a month
//! - reports: statistics, bar chart and pie chart for a month
//! - combined: all four views at once, as HTML or JSON
//! - seed: replaces the collection with the remote dataset
//!
//! Each module follows a consistent structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON/plain-text endpoints
//! - page.rs: HTML page rendering

pub mod combined;
pub mod reports;
pub mod seed;
pub mod transactions;

use std::collections::HashMap;

/// Raw query string parameters. Every value is optional and unvalidated.
pub type Params = axum::extract::Query<HashMap<String, String>>;

/// Look up a query parameter by name
pub(crate) fn param<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params.get(key).map(|s| s.as_str())
}
