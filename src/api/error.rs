//! HTTP error envelope.
//!
//! Every failure leaves the API as `{"code": ..., "message": ...}` with a
//! status derived from the variant.

use crate::account::services::AccountError;
use crate::task::services::TaskServiceError;
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Errors returned by HTTP handlers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request body or parameters are invalid.
    #[error("{0}")]
    Validation(String),

    /// No usable credentials were presented.
    #[error("{0}")]
    Unauthenticated(String),

    /// The caller may not touch the resource.
    #[error("{0}")]
    PermissionDenied(String),

    /// The resource does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The resource already exists.
    #[error("{0}")]
    Conflict(String),

    /// Storage or another internal dependency failed.
    #[error("{0}")]
    Storage(String),
}

/// Wire body of an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    /// Stable machine-readable code.
    pub code: &'static str,
    /// Human-readable description.
    pub message: String,
}

impl ApiError {
    /// Returns the HTTP status for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::PermissionDenied(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the stable error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::Unauthenticated(_) => "UNAUTHENTICATED",
            Self::PermissionDenied(_) => "PERMISSION_DENIED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "ALREADY_EXISTS",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }

    fn storage(err: &impl std::error::Error) -> Self {
        tracing::error!(error = %err, "request failed in storage layer");
        Self::Storage("internal storage failure".to_owned())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            code: self.error_code(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<TaskServiceError> for ApiError {
    fn from(err: TaskServiceError) -> Self {
        match err {
            TaskServiceError::Domain(domain) => Self::Validation(domain.to_string()),
            TaskServiceError::NotFound(_) => Self::NotFound("Task not found".to_owned()),
            TaskServiceError::NotOwner(_) => {
                Self::PermissionDenied("User not authorized".to_owned())
            }
            TaskServiceError::Repository(ref repository) => Self::storage(repository),
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Domain(domain) => Self::Validation(domain.to_string()),
            AccountError::EmailTaken(_) => Self::Conflict("User already exists".to_owned()),
            AccountError::InvalidCredentials => {
                Self::Unauthenticated("Invalid email or password".to_owned())
            }
            AccountError::InvalidToken(_) => {
                Self::Unauthenticated("Not authorized, token failed".to_owned())
            }
            AccountError::Issuance(ref token) => Self::storage(token),
            AccountError::Repository(ref repository) => Self::storage(repository),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}
