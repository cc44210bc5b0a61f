//! API endpoint handlers

use super::extractors::{OperationName, RequestParams};
use super::types::*;
use crate::error::ServerError;
use axum::{extract::State, Json};
use tracing::{info, warn};
use tuscan_core::Evaluation;

/// Health check endpoint
pub(super) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        standard: state.dispatcher.standard().to_string(),
    })
}

/// Evaluation endpoint, one route per operation of the configured standard
pub(super) async fn evaluate(
    State(state): State<AppState>,
    OperationName(operation): OperationName,
    RequestParams(params): RequestParams,
) -> Result<Json<Evaluation>, ServerError> {
    info!(
        "Received {} request with {} parameters",
        operation,
        params.len()
    );

    let evaluation = state
        .dispatcher
        .dispatch(operation, &params)
        .map_err(|e| {
            warn!("Rejected {} request: {}", operation, e);
            ServerError::from(e)
        })?;

    info!("Evaluated {} = {}", operation, evaluation.value);
    Ok(Json(evaluation))
}
