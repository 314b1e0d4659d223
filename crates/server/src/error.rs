//! Unified error handling for HTTP handlers.
//!
//! Provides a unified `AppError` type that maps domain errors and rejected
//! request input to JSON error responses. All route handlers should return
//! `Result<T, AppError>`.
//!
//! Every variant is a client error. They are logged at `info` and never sent
//! to Sentry.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use user_registry_core::Violation;

use crate::services::UserError;

/// Application-level error type for the user registry.
#[derive(Debug, Error)]
pub enum AppError {
    /// A user operation was refused.
    #[error(transparent)]
    User(#[from] UserError),

    /// The request could not be decoded.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violations: Option<&'a [Violation]>,
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::User(UserError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::User(
                UserError::Validation(_)
                | UserError::AgeIneligible { .. }
                | UserError::InvalidRange { .. },
            )
            | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::info!(status = status.as_u16(), error = %self, "Request rejected");

        let violations = match &self {
            Self::User(UserError::Validation(violations)) => Some(violations.as_slice()),
            Self::User(_) | Self::BadRequest(_) => None,
        };
        let body = ErrorBody {
            error: self.to_string(),
            violations,
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
