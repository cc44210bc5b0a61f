//! Server error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tuscan_core::DispatchError;

/// Server error type
#[derive(Error, Debug)]
pub enum ServerError {
    /// Malformed request: missing or non-numeric parameters, undecodable body
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The calculation backend rejected the request's values
    #[error("Calculation error: {0}")]
    CalculationError(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    InternalError(String),

    /// Not found
    #[error("Not found: {0}")]
    NotFound(String),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::InvalidRequest(_) | ServerError::CalculationError(_) => {
                StatusCode::BAD_REQUEST
            }
            ServerError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            ServerError::InvalidRequest(msg)
            | ServerError::CalculationError(msg)
            | ServerError::InternalError(msg)
            | ServerError::NotFound(msg) => msg,
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

impl From<DispatchError> for ServerError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::Calculation(inner) => ServerError::CalculationError(inner.to_string()),
            other => ServerError::InvalidRequest(other.to_string()),
        }
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::InternalError(err.to_string())
    }
}
