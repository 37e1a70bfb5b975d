//! PolicyDesk API - Backend for policy document management
//!
//! Provides REST endpoints for:
//! - Document CRUD with filtered/sorted list views
//! - Explicit status transitions with an audit trail
//! - Template listing, render preview, and policy generation

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;
pub mod models;
pub mod state;

use state::AppState;

/// Build the application router
pub fn build_router(state: Arc<AppState>) -> Router {
    // CORS configuration for web clients
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Document endpoints
        .route(
            "/api/documents",
            get(handlers::list_documents).post(handlers::create_document),
        )
        .route("/api/documents/generate", post(handlers::generate_document))
        .route(
            "/api/documents/:id",
            get(handlers::get_document)
                .put(handlers::update_document)
                .delete(handlers::delete_document),
        )
        .route("/api/documents/:id/status", post(handlers::set_status))
        .route("/api/documents/:id/audit", get(handlers::get_audit))
        // Template endpoints
        .route("/api/templates", get(handlers::list_templates))
        .route("/api/templates/:name/render", post(handlers::render_template))
        // Add middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
