//! Auth-related types and configuration.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Name of the session cookie
pub const COOKIE_NAME: &str = "token";

/// Session tokens live for two hours; there is no refresh.
pub const TOKEN_LIFETIME_HOURS: i64 = 2;

/// JWT Claims structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Identity id of the signed-in user
    pub uid: String,
    pub email: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// Any other keys the client put in the identity payload
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Validated user from JWT, attached to the request by `require_auth`
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub uid: String,
    pub email: String,
    pub claims: Claims,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        AuthUser {
            uid: claims.uid.clone(),
            email: claims.email.clone(),
            claims,
        }
    }
}

/// Auth configuration loaded once at startup
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_duration: Duration,
    pub cookie_name: String,
    /// Adds `SameSite=None; Secure` so the cookie survives cross-site requests
    pub cross_site_cookies: bool,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>, cross_site_cookies: bool) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_duration: Duration::hours(TOKEN_LIFETIME_HOURS),
            cookie_name: COOKIE_NAME.to_string(),
            cross_site_cookies,
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_duration", &self.token_duration)
            .field("cookie_name", &self.cookie_name)
            .field("cross_site_cookies", &self.cross_site_cookies)
            .finish()
    }
}
