//! Router creation and configuration

use super::handlers::*;
use super::types::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tuscan_core::Dispatcher;

/// Create REST API router
///
/// Evaluation routes live under the dispatcher's standard, e.g.
/// `POST /its90/wr`.
pub fn create_router(dispatcher: Dispatcher) -> Router {
    let evaluate_path = format!("/{}/:operation", dispatcher.standard());
    let state = AppState {
        dispatcher: Arc::new(dispatcher),
    };

    Router::new()
        .route("/health", get(health))
        .route(&evaluate_path, post(evaluate))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
