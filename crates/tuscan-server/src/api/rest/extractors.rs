//! Request extraction
//!
//! The operation comes from the path and is resolved before the body is
//! read, so an unknown operation is reported as such whatever the body
//! holds. Parameters come from the query string and, depending on the content
//! type, from a form-encoded or JSON object body. Body parameters replace
//! query parameters of the same name. Bodies of any other content type are
//! ignored.

use crate::error::ServerError;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Path, Query, Request},
    http::{header::CONTENT_TYPE, request::Parts},
    Form, Json,
};
use serde_json::Value;
use std::collections::HashMap;
use tuscan_core::{Operation, RawParams};

/// Operation named by the last path segment
pub struct OperationName(pub Operation);

#[axum::async_trait]
impl<S> FromRequestParts<S> for OperationName
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(name) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ServerError::NotFound(format!("Unknown operation path: {}", e)))?;

        name.parse().map(Self).map_err(ServerError::NotFound)
    }
}

/// Raw parameters of one evaluation request
pub struct RequestParams(pub RawParams);

#[axum::async_trait]
impl<S> FromRequest<S> for RequestParams
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<HashMap<String, String>>::try_from_uri(req.uri())
            .map_err(|e| ServerError::InvalidRequest(format!("Invalid query string: {}", e)))?;
        let mut params: RawParams = into_raw(query);

        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_ascii_lowercase())
            .unwrap_or_default();

        if content_type.starts_with("application/json") {
            let Json(body) = Json::<HashMap<String, Value>>::from_request(req, state)
                .await
                .map_err(json_rejection)?;
            params.extend(body);
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(body) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| ServerError::InvalidRequest(format!("Invalid form body: {}", e)))?;
            params.extend(into_raw(body));
        }

        Ok(Self(params))
    }
}

fn into_raw(fields: HashMap<String, String>) -> RawParams {
    fields
        .into_iter()
        .map(|(name, value)| (name, Value::String(value)))
        .collect()
}

fn json_rejection(rejection: JsonRejection) -> ServerError {
    let message = match rejection {
        JsonRejection::JsonDataError(err) => {
            format!("Invalid JSON data: {}", err)
        }
        JsonRejection::JsonSyntaxError(err) => {
            format!("JSON syntax error: {}", err)
        }
        _ => format!("Failed to parse JSON: {}", rejection),
    };
    ServerError::InvalidRequest(message)
}
