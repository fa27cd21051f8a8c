//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::handler::Handler;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;
use crate::static_files;

/// Create the application router.
///
/// `/static/*` serves files; every other path is a page and carries the
/// security headers.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let pages = ServiceBuilder::new()
        .layer(security::hsts_layer())
        .layer(security::frame_options_layer())
        .layer(security::content_type_options_layer())
        .layer(security::referrer_policy_layer())
        .service(handlers::pages::serve_page.with_state(Arc::clone(&state)));

    Router::new()
        .route("/static/{*path}", get(static_files::serve_static))
        .fallback_service(pages)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
