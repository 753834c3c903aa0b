//! Combined routes - transactions, statistics and both charts for one month
//!
//! Structure:
//! - api.rs: JSON endpoint
//! - page.rs: Full page rendering

pub mod api;
pub mod page;

pub use api::api_combined;
pub use page::page_combined;
