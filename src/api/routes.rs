//! API Routes
//!
//! Configures the Axum router in front of the dispatcher.

use axum::{
    routing::{any, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    collection_handler, fallback_handler, health_handler, item_handler, AppState,
};

/// Creates the main router.
///
/// Both passport resources accept every method so that unsupported
/// method/path pairs reach the dispatcher and get its 400 response rather
/// than a 405.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/passports", any(collection_handler))
        .route("/passports/:address", any(item_handler))
        .route("/health", get(health_handler))
        .fallback(fallback_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
