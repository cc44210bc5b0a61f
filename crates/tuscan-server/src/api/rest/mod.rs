//! REST API implementation
//!
//! - types: Request/response type definitions
//! - extractors: Operation and parameter extraction
//! - handlers: API endpoint handlers
//! - router: Router creation and configuration
//! - tests: Unit tests for the extractor and handlers

mod extractors;
mod handlers;
mod router;
pub mod types;

// Re-export public API
pub use extractors::{OperationName, RequestParams};
pub use router::create_router;
pub use types::{AppState, HealthResponse};
