//! HTTP route handlers for the panel.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health    - Liveness check
//!
//! # Pages
//! GET  /          - Dashboard with the compact domain widget
//! GET  /overview  - Detailed overview for the current domain
//! GET  /settings  - Settings form
//! POST /settings  - Persist settings (redirects back with a message)
//! ```

pub mod dashboard;
pub mod overview;
pub mod settings;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Build all routes for the panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .merge(dashboard::router())
        .merge(overview::router())
        .merge(settings::router())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}
