//! Combined API endpoint - JSON

use super::super::{param, Params};
use crate::{ApiError, AppState};
use axum::Json;
use salesboard_core::CombinedData;

pub async fn api_combined(
    state: axum::extract::State<AppState>,
    params: Params,
) -> Result<Json<CombinedData>, ApiError> {
    let month = param(&params, "month");
    state
        .reporter
        .combined(month)
        .await
        .map(Json)
        .map_err(|e| state.fail("combined_data", month, "Error fetching combined data.", e))
}
