//! Report routes - statistics and chart data for a month

pub mod api;

pub use api::{api_bar_chart, api_pie_chart, api_statistics};
