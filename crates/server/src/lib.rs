//! Calculator Server - HTTP REST API for the query-string calculator
//!
//! Exposes [`calcapi::calculate`] over HTTP:
//!
//! - `GET /calculate?num1=<n>&num2=<n>&operation=<op>` - `{ "result": n }` or
//!   400 `{ "error": "..." }`
//! - `GET /api-docs` - Swagger UI, backed by `GET /api-docs/openapi.json`
//! - `GET /health` - Liveness check
//! - `GET /metrics` - Prometheus metrics
//! - `GET /` - API information
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
