//! Unified error handling for the backend API.
//!
//! This module provides a centralized error type that implements `IntoResponse`,
//! allowing handlers to use `?` operator naturally while returning appropriate
//! HTTP status codes and error messages. Anything that is not an auth,
//! validation or conflict failure answers a generic 500 with no details.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Unified error type for API handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing, malformed, forged or expired session token
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not the owner of the resource
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Request body failed its schema
    #[error("Invalid request: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Body that is not JSON or does not fit the payload type
    #[error("Malformed body: {0}")]
    Body(#[from] JsonRejection),

    /// Unique constraint hit (email already registered, already applied)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Path id that is not a UUID
    #[error("Invalid id: {0}")]
    InvalidId(String),

    /// Store or any other unexpected failure
    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        ApiError::Unauthorized(reason.into())
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        ApiError::Forbidden(reason.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message, details) = match &self {
            ApiError::Unauthorized(reason) => {
                tracing::debug!("Rejected unauthenticated request: {}", reason);
                (
                    StatusCode::UNAUTHORIZED,
                    "Unauthorized request".to_string(),
                    None,
                )
            }
            ApiError::Forbidden(reason) => {
                tracing::warn!("Ownership check failed: {}", reason);
                (StatusCode::FORBIDDEN, "Forbidden".to_string(), None)
            }
            ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation failed".to_string(),
                Some(errors.to_string()),
            ),
            ApiError::Body(rejection) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation failed".to_string(),
                Some(rejection.body_text()),
            ),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone(), None),
            ApiError::InvalidId(raw) => {
                tracing::error!("Malformed resource id: {:?}", raw);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
            details,
        });

        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
