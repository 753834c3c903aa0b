//! Error types for salesboard-core
//!
//! Every failure the reporting and seeding operations can raise, with
//! error codes, severities and suggestions for the operator log.

use salesboard_store::StoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Seed source unreachable or returned an error status
    SeedFetch,
    /// Seed body is not an array of transactions
    InvalidSeedData,
    /// Store connect/query/write failure
    StoreError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::SeedFetch => write!(f, "SEED_FETCH"),
            ErrorCode::InvalidSeedData => write!(f, "INVALID_SEED_DATA"),
            ErrorCode::StoreError => write!(f, "STORE_ERROR"),
        }
    }
}

/// Detailed error information for logs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    /// Add detail information
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Warning - operation may be affected
    Warning,
    /// Error - operation failed
    Error,
    /// Critical - application may be unstable
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Main error type for salesboard-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Seed fetch failed: {message}")]
    SeedFetch { message: String },

    #[error("Invalid seed data: {message}")]
    InvalidSeedData { message: String },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::SeedFetch { .. } => ErrorCode::SeedFetch,
            CoreError::InvalidSeedData { .. } => ErrorCode::InvalidSeedData,
            CoreError::Store(_) => ErrorCode::StoreError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::SeedFetch { .. } => ErrorSeverity::Warning,
            CoreError::InvalidSeedData { .. } => ErrorSeverity::Error,
            CoreError::Store(StoreError::ConnectionFailed { .. }) => ErrorSeverity::Critical,
            CoreError::Store(_) => ErrorSeverity::Error,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::SeedFetch { .. } => {
                details = details.with_suggestion(
                    "Check that seed.url is reachable from this host.".to_string()
                );
            }
            CoreError::InvalidSeedData { message } => {
                details = details.with_detail(serde_json::json!({ "decode_message": message }));
                details = details.with_suggestion(
                    "The seed source must return a JSON array of transactions.".to_string()
                );
            }
            CoreError::Store(StoreError::ConnectionFailed { .. }) => {
                details = details.with_suggestion(
                    "Check database.uri and that the MongoDB server is running.".to_string()
                );
            }
            _ => {}
        }

        details
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            CoreError::InvalidSeedData { message: error.to_string() }
        } else {
            CoreError::SeedFetch { message: error.to_string() }
        }
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation being performed
    pub operation: String,
    /// Additional context data
    pub data: serde_json::Value,
}

impl ErrorContext {
    /// Create a new error context
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            data: serde_json::json!({}),
        }
    }

    /// Add context data
    pub fn with_data(mut self, key: &str, value: serde_json::Value) -> Self {
        self.data[key] = value;
        self
    }
}

/// Error logger trait
pub trait ErrorLogger: Send + Sync {
    /// Log an error
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Debug, Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        let level = match error.severity() {
            ErrorSeverity::Warning => log::Level::Warn,
            ErrorSeverity::Error | ErrorSeverity::Critical => log::Level::Error,
        };
        log::log!(
            target: "salesboard::error",
            level,
            "{} [{}] {} - Operation: {} - Context: {}",
            error.severity(),
            error.code(),
            error.to_details(),
            context.operation,
            context.data
        );
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::SeedFetch.to_string(), "SEED_FETCH");
        assert_eq!(ErrorCode::StoreError.to_string(), "STORE_ERROR");
    }

    #[test]
    fn test_core_error_code_and_severity() {
        let error = CoreError::SeedFetch { message: "timeout".to_string() };
        assert_eq!(error.code(), ErrorCode::SeedFetch);
        assert_eq!(error.severity(), ErrorSeverity::Warning);

        let error = CoreError::Store(StoreError::LockPoisoned);
        assert_eq!(error.code(), ErrorCode::StoreError);
        assert_eq!(error.severity(), ErrorSeverity::Error);

        let error = CoreError::Store(StoreError::ConnectionFailed { message: "refused".to_string() });
        assert_eq!(error.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_invalid_seed_data_details() {
        let error = CoreError::InvalidSeedData { message: "expected array".to_string() };
        let details = error.to_details();

        assert_eq!(details.code, ErrorCode::InvalidSeedData);
        assert!(details.details.is_some());
        assert!(!details.suggestions.is_empty());
        assert!(details.message.contains("expected array"));
    }

    #[test]
    fn test_error_context() {
        let context = ErrorContext::new("statistics")
            .with_data("month", serde_json::json!("3"));

        assert_eq!(context.operation, "statistics");
        assert_eq!(context.data["month"], "3");
    }
}
