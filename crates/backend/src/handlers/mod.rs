//! HTTP handlers, one module per collection.

pub mod applications;
pub mod content;
pub mod jobs;
pub mod users;

use axum::http::StatusCode;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

/// Parse a path id. A malformed id is reported like any other server error.
pub(crate) fn parse_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::InvalidId(raw.to_string()))
}

pub async fn root_handler() -> &'static str {
    "Searching For Jobs............"
}

pub async fn health_check() -> StatusCode {
    StatusCode::OK
}
