//! API route handlers
//!
//! - `calculate`: the arithmetic endpoint
//! - `docs`: OpenAPI document and Swagger UI
//! - `health`: liveness and Prometheus metrics

pub mod calculate;
pub mod docs;
pub mod health;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info
///
/// # Response
///
/// ```json
/// {
///   "name": "API de Cálculo",
///   "version": "0.1.0",
///   "endpoints": ["..."]
/// }
/// ```
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "API de Cálculo",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/calculate",
            docs::DOCS_PATH,
            docs::OPENAPI_PATH,
            "/health",
            "/metrics"
        ]
    })))
}

/// 404 Not Found handler
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
