//! HTTP API server
//!
//! Routes are organized into modules:
//! - routes::seed: Collection (re)initialization from the seed URL
//! - routes::transactions: Month listing with search and pagination
//! - routes::reports: Statistics, bar chart and pie chart
//! - routes::combined: All four views as an HTML page or JSON

pub mod error;
pub mod routes;

use axum::{routing::get, Router};
use salesboard_config::Config;
use salesboard_core::{
    CoreError, DefaultErrorLogger, ErrorContext, ErrorLogger, Reporter, SeedSourceRef, Seeder,
};
use salesboard_store::StoreRef;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub reporter: Reporter,
    pub seeder: Seeder,
    pub config: Config,
    pub error_logger: Arc<dyn ErrorLogger>,
}

impl AppState {
    pub fn new(config: Config, store: StoreRef, seed_source: SeedSourceRef) -> Self {
        Self {
            reporter: Reporter::new(store.clone(), config.pagination.per_page),
            seeder: Seeder::new(seed_source, store),
            config,
            error_logger: Arc::new(DefaultErrorLogger),
        }
    }

    /// Log a handler failure with its operation context and wrap it for the client
    pub(crate) fn fail(
        &self,
        operation: &str,
        month: Option<&str>,
        message: &'static str,
        error: CoreError,
    ) -> ApiError {
        let mut context = ErrorContext::new(operation);
        if let Some(month) = month {
            context = context.with_data("month", serde_json::json!(month));
        }
        self.error_logger.log_error(&error, &context);
        ApiError::internal(message, error)
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::combined::{api_combined, page_combined};
    use routes::reports::{api_bar_chart, api_pie_chart, api_statistics};
    use routes::seed::api_initialize;
    use routes::transactions::api_transactions;

    Router::new()
        .route("/api/health", get(health_check))
        .route("/initialize", get(api_initialize))
        .route("/transactions", get(api_transactions))
        .route("/statistics", get(api_statistics))
        .route("/bar_chart", get(api_bar_chart))
        .route("/pie_chart", get(api_pie_chart))
        .route("/combined_data", get(page_combined))
        .route("/api/combined_data", get(api_combined))
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Salesboard</title>
    <script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        salesboard_utils::escape_html(title),
        content
    )
}

/// Start the HTTP server and run until Ctrl-C
pub async fn start_server(state: AppState) -> anyhow::Result<()> {
    let addr = state.config.bind_address();
    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting Salesboard server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - /initialize (Seed the collection)");
    log::info!("  - /transactions (Month listing)");
    log::info!("  - /statistics, /bar_chart, /pie_chart (Month reports)");
    log::info!("  - /combined_data (HTML view), /api/combined_data (JSON)");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }
}

// ==================== Tests ====================
