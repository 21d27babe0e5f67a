//! Job Spring backend: job board HTTP API with cookie-based JWT sessions.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod schema;
pub mod services;

#[cfg(test)]
pub(crate) mod memory;

use crate::auth::AuthConfig;
use crate::repository::JobBoardStore;

/// Shared, immutable state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn JobBoardStore>,
    pub auth_config: Arc<AuthConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn JobBoardStore>, auth_config: AuthConfig) -> Self {
        Self {
            store,
            auth_config: Arc::new(auth_config),
        }
    }
}

/// Build the API router. Gated routes sit behind `require_auth`.
pub fn build_router(state: AppState) -> Router {
    let gated = Router::new()
        .route("/users/:uid", get(handlers::users::get_user))
        .route("/my-jobs/:uid", get(handlers::jobs::my_jobs))
        .route("/job-details/:id", get(handlers::jobs::job_details))
        .route(
            "/get-applied-jobs/:uid",
            get(handlers::applications::applied_jobs),
        )
        .route(
            "/get-applications/:uid",
            get(handlers::applications::user_applications),
        )
        .route(
            "/job-applications/:id",
            get(handlers::jobs::job_applications),
        )
        .route("/add-job", post(handlers::jobs::add_job))
        .route("/apply-job", post(handlers::applications::apply_job))
        .route("/update-my-job/:id", patch(handlers::jobs::update_my_job))
        .route(
            "/update-job-applicants/:id",
            patch(handlers::jobs::update_job_applicants),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    Router::new()
        .route("/", get(handlers::root_handler))
        .route("/health", get(handlers::health_check))
        // Users
        .route(
            "/users",
            post(handlers::users::create_user).put(handlers::users::upsert_user),
        )
        // Session
        .route("/jwt", post(auth::issue_token))
        .route("/logout", post(auth::logout))
        // Jobs
        .route("/get-all-jobs", get(handlers::jobs::list_jobs))
        .route("/get-jobs-count", get(handlers::jobs::count_jobs))
        .route("/search", get(handlers::jobs::search_jobs))
        // Content
        .route("/get-blog-posts", get(handlers::content::list_blog_posts))
        .route("/get-blog-post/:id", get(handlers::content::get_blog_post))
        .route(
            "/get-testimonials",
            get(handlers::content::list_testimonials),
        )
        .merge(gated)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build CORS layer for the configured origins.
///
/// Credentials are allowed so the browser sends the session cookie, which
/// rules out wildcard origins.
pub fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    if origins.is_empty() {
        tracing::warn!("No valid CORS origins configured, cross-origin requests will be refused");
    } else {
        tracing::info!("CORS configured for origins: {:?}", origins);
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}
