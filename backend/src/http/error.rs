//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::repository::RepositoryError;
use crate::models::schedule::ScheduleError;
use crate::services::calculators::CalculatorError;
use crate::services::converters::ConversionError;
use crate::services::deadline::DeadlineError;
use crate::services::support::SupportError;
use crate::services::text::TextError;
use crate::services::timezone::TimeZoneError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Invalid tool input; `details` points at the offending part
    BadRequest {
        message: String,
        details: Option<String>,
    },
    /// Internal server error
    Internal(String),
    /// Preference store error
    Repository(RepositoryError),
}

impl AppError {
    pub fn bad_request(message: impl ToString) -> Self {
        AppError::BadRequest {
            message: message.to_string(),
            details: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest { message, details } => {
                let mut error = ApiError::new("BAD_REQUEST", message);
                error.details = details;
                (StatusCode::BAD_REQUEST, error)
            }
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
            AppError::Repository(e) => {
                let details = e.context().to_string();
                match e {
                    RepositoryError::NotFound { message, .. } => (
                        StatusCode::NOT_FOUND,
                        ApiError::new("NOT_FOUND", message).with_details(details),
                    ),
                    RepositoryError::ValidationError { message, .. } => (
                        StatusCode::BAD_REQUEST,
                        ApiError::new("BAD_REQUEST", message).with_details(details),
                    ),
                    other => {
                        tracing::error!("preference store failure: {}", other);
                        (
                            StatusCode::INTERNAL_SERVER_ERROR,
                            ApiError::new("REPOSITORY_ERROR", other.to_string()),
                        )
                    }
                }
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<TextError> for AppError {
    fn from(err: TextError) -> Self {
        let details = match &err {
            TextError::InvalidJson { line, column, .. } => {
                Some(format!("line {}, column {}", line, column))
            }
            _ => None,
        };
        AppError::BadRequest {
            message: err.to_string(),
            details,
        }
    }
}

macro_rules! bad_request_from {
    ($($err:ty),* $(,)?) => {
        $(
            impl From<$err> for AppError {
                fn from(err: $err) -> Self {
                    AppError::bad_request(err)
                }
            }
        )*
    };
}

bad_request_from!(
    DeadlineError,
    ScheduleError,
    TimeZoneError,
    ConversionError,
    CalculatorError,
    SupportError,
);
