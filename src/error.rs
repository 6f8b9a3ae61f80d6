//! Error types for the LocalLibrary server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::views;

/// Main application error type
///
/// Validation failures, duplicate genres and blocked deletes are not errors:
/// the services return them as outcomes and the controllers re-render or
/// redirect. Only what ends on the generic error page lives here.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show in any run mode
    fn public_message(&self) -> String {
        match self {
            AppError::NotFound(msg) | AppError::BadRequest(msg) => msg.clone(),
            AppError::Database(_) => "Database error".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

/// What the error page needs, attached to the response so the
/// error-page middleware can re-render it with details in development mode.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub status: StatusCode,
    pub message: String,
    pub detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Database(e) => tracing::error!("Database error: {:?}", e),
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
            AppError::NotFound(msg) => tracing::debug!("Not found: {}", msg),
            AppError::BadRequest(msg) => tracing::debug!("Bad request: {}", msg),
        }

        let report = ErrorReport {
            status: self.status(),
            message: self.public_message(),
            detail: self.to_string(),
        };

        let mut response = (report.status, views::error::page(&report, false)).into_response();
        response.extensions_mut().insert(report);
        response
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
