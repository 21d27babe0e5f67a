//! Authentication middleware layer for protecting routes.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::AppState;

use super::jwt;
use super::types::{AuthConfig, AuthUser};

/// Middleware function that requires a valid session cookie.
///
/// Used with `axum::middleware::from_fn_with_state` on the gated routes. On
/// success the decoded [`AuthUser`] is available to handlers through
/// `Extension<AuthUser>`; on failure the handler never runs.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match authenticate(request.headers(), &state.auth_config) {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(err) => err.into_response(),
    }
}

/// Extract and validate the session token from request headers.
pub fn authenticate(headers: &HeaderMap, config: &AuthConfig) -> Result<AuthUser, ApiError> {
    let token = extract_token_from_cookie(headers, &config.cookie_name)
        .ok_or_else(|| ApiError::unauthorized("missing session cookie"))?;

    let claims = jwt::validate_token(config, &token)
        .map_err(|e| ApiError::unauthorized(format!("invalid session token: {}", e)))?;

    Ok(AuthUser::from(claims))
}

fn extract_token_from_cookie(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    for value in headers.get_all(header::COOKIE) {
        let Ok(cookie_header) = value.to_str() else {
            continue;
        };

        for cookie_str in cookie_header.split(';') {
            if let Ok(cookie) = cookie::Cookie::parse(cookie_str.trim()) {
                if cookie.name() == cookie_name && !cookie.value().is_empty() {
                    return Some(cookie.value().to_string());
                }
            }
        }
    }

    None
}

fn cookie_attributes(config: &AuthConfig) -> &'static str {
    if config.cross_site_cookies {
        "; SameSite=None; Secure"
    } else {
        "; SameSite=Lax"
    }
}

/// Build the session cookie string.
pub fn build_auth_cookie(config: &AuthConfig, value: &str) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; Max-Age={}{}",
        config.cookie_name,
        value,
        config.token_duration.num_seconds(),
        cookie_attributes(config)
    )
}

/// Build a cookie string that makes the browser drop the session cookie.
pub fn clear_auth_cookie(config: &AuthConfig) -> String {
    format!(
        "{}=; Path=/; HttpOnly; Max-Age=0{}",
        config.cookie_name,
        cookie_attributes(config)
    )
}
