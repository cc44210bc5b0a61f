//! REST API type definitions

use serde::Serialize;
use std::sync::Arc;
use tuscan_core::Dispatcher;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub standard: String,
}
