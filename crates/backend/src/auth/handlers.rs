//! Session token HTTP handlers.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use jobspring_types::{MessageResponse, SuccessResponse, TokenRequest};
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use crate::extract::Json;
use crate::AppState;

use super::{build_auth_cookie, clear_auth_cookie, jwt};

/// Sign the identity payload and hand it back as the session cookie.
pub async fn issue_token(
    State(state): State<AppState>,
    Json(identity): Json<TokenRequest>,
) -> ApiResult<Response> {
    identity.validate()?;

    let config = &state.auth_config;
    let uid = identity.uid.clone();

    let token = jwt::create_token(config, identity)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("Failed to create token: {}", e)))?;

    let cookie = build_auth_cookie(config, &token);

    tracing::info!("Issued session token for uid {}", uid);

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(SuccessResponse { success: true }),
    )
        .into_response())
}

/// Logout - clear the session cookie.
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let cookie = clear_auth_cookie(&state.auth_config);

    (
        [(header::SET_COOKIE, cookie)],
        Json(MessageResponse {
            message: "logout successful".to_string(),
        }),
    )
}
