//! Transactions API endpoint - JSON array of records

use super::super::{param, Params};
use crate::{ApiError, AppState};
use axum::Json;
use salesboard_core::TransactionQuery;
use salesboard_store::ProductTransaction;

/// Month listing: `month`, optional `search`, `page` (1-based), `perPage`
pub async fn api_transactions(
    state: axum::extract::State<AppState>,
    params: Params,
) -> Result<Json<Vec<ProductTransaction>>, ApiError> {
    let month = param(&params, "month");
    let query = TransactionQuery::from_raw(
        month,
        param(&params, "search"),
        param(&params, "page"),
        param(&params, "perPage"),
        state.reporter.default_per_page(),
    );

    state
        .reporter
        .list_transactions(&query)
        .await
        .map(Json)
        .map_err(|e| state.fail("list_transactions", month, "Error fetching transactions.", e))
}
