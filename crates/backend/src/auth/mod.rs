//! Authentication module for cookie-based JWT sessions.
//!
//! This module provides:
//! - JWT token creation and validation
//! - `/jwt` and `/logout` handlers that set and clear the session cookie
//! - `require_auth` middleware for protecting routes
//! - Ownership checks for user- and publisher-scoped routes

mod handlers;
pub mod jwt;
mod middleware;
pub mod ownership;
pub mod types;

pub use handlers::{issue_token, logout};
pub use middleware::{authenticate, build_auth_cookie, clear_auth_cookie, require_auth};
pub use types::{AuthConfig, AuthUser, Claims};
