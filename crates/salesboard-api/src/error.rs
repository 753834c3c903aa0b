//! Error types for salesboard-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use salesboard_core::CoreError;
use thiserror::Error;

/// Handler failure. Clients only ever see the generic message.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    Internal {
        message: &'static str,
        #[source]
        source: CoreError,
    },
}

impl ApiError {
    pub fn internal(message: &'static str, source: CoreError) -> Self {
        ApiError::Internal { message, source }
    }

    /// Plain-text body sent to the client
    pub fn message(&self) -> &'static str {
        match self {
            ApiError::Internal { message, .. } => message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.message()).into_response()
    }
}
