//! Reports API endpoints - JSON API
//!
//! Endpoints:
//! - api_statistics: total sale amount, sold and unsold counts
//! - api_bar_chart: price histogram over the fixed buckets
//! - api_pie_chart: record count per category

use super::super::{param, Params};
use crate::{ApiError, AppState};
use axum::Json;
use salesboard_core::{PriceRangeCount, Statistics};
use salesboard_store::CategoryCount;

pub async fn api_statistics(
    state: axum::extract::State<AppState>,
    params: Params,
) -> Result<Json<Statistics>, ApiError> {
    let month = param(&params, "month");
    state
        .reporter
        .statistics(month)
        .await
        .map(Json)
        .map_err(|e| state.fail("statistics", month, "Error fetching statistics.", e))
}

pub async fn api_bar_chart(
    state: axum::extract::State<AppState>,
    params: Params,
) -> Result<Json<Vec<PriceRangeCount>>, ApiError> {
    let month = param(&params, "month");
    state
        .reporter
        .bar_chart(month)
        .await
        .map(Json)
        .map_err(|e| state.fail("bar_chart", month, "Error fetching bar chart data.", e))
}

pub async fn api_pie_chart(
    state: axum::extract::State<AppState>,
    params: Params,
) -> Result<Json<Vec<CategoryCount>>, ApiError> {
    let month = param(&params, "month");
    state
        .reporter
        .pie_chart(month)
        .await
        .map(Json)
        .map_err(|e| state.fail("pie_chart", month, "Error fetching pie chart data.", e))
}
