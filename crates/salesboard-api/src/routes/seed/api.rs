//! Seed API endpoint - plain-text confirmation

use crate::{ApiError, AppState};
use salesboard_core::SEED_SUCCESS_MESSAGE;

/// Fetch the remote dataset and replace every stored record with it
pub async fn api_initialize(state: axum::extract::State<AppState>) -> Result<&'static str, ApiError> {
    state
        .seeder
        .initialize()
        .await
        .map(|_| SEED_SUCCESS_MESSAGE)
        .map_err(|e| state.fail("initialize", None, "Error initializing database.", e))
}
