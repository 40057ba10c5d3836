//! Server initialization and routing
//!
//! This module is the composition root: it wires configuration, logging,
//! metrics and the router together and owns the listener lifecycle.

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::middleware::{log_requests, request_id};
use crate::routes::{api_info, calculate, docs, health, not_found};
use crate::state::ServerState;
use anyhow::Context;
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Build the Axum router with all routes and middleware
///
/// Middleware, outermost first: request ID, access log, trace, CORS,
/// compression, timeout, panic recovery.
pub fn build_router(state: Arc<ServerState>) -> Router {
    let cors = if state.config.enable_cors {
        CorsLayer::new()
            .allow_origin(AnyOrigin)
            .allow_methods(AnyOrigin)
            .allow_headers(AnyOrigin)
    } else {
        CorsLayer::new()
    };

    let mut router = Router::new()
        .route("/", get(api_info))
        .route("/calculate", get(calculate::calculate))
        .route("/health", get(health::health_check))
        .route("/metrics", get(health::metrics));

    if state.config.docs_enabled {
        let openapi_doc = Arc::new(docs::openapi(&state.config));
        router = router
            .route(
                docs::OPENAPI_PATH,
                get({
                    use axum::{http::header, Json};
                    let doc = openapi_doc;
                    move || async move {
                        ([(header::CACHE_CONTROL, "no-store")], Json(doc.as_ref())).into_response()
                    }
                }),
            )
            .route(docs::DOCS_PATH, get(docs::swagger_ui))
            .route("/api-docs/", get(docs::swagger_ui));
    }

    router
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.config.timeout(),
        ))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(log_requests))
        .layer(from_fn(request_id))
        .with_state(state)
}

/// Last-resort handler for panics escaping a route handler.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    ServerError::Internal(detail).into_response()
}

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over the configured `log_level`.
pub fn init_tracing(config: &ServerConfig) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(true)
        .with_thread_names(true);

    if config.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Start the calculator HTTP server
///
/// Blocks until the server is shut down via SIGTERM or Ctrl+C.
///
/// # Initialization
///
/// 1. Sets up structured logging with the configured filter
/// 2. Installs the Prometheus recorder when metrics are enabled
/// 3. Builds the Axum router
/// 4. Binds to the configured TCP address
/// 5. Serves with graceful shutdown
///
/// # Example
///
/// ```rust,no_run
/// use server::ServerConfig;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let config = ServerConfig::load()?;
///     server::start_server(config).await?;
///     Ok(())
/// }
/// ```
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    init_tracing(&config);

    let addr: SocketAddr = config.socket_addr()?;

    let mut state = ServerState::new(config.clone());
    if config.metrics_enabled {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("failed to install Prometheus recorder")?;
        metrics::describe_counter!(
            "calc_requests_total",
            "Calculation requests by operation and outcome"
        );
        state = state.with_metrics(handle);
    }

    let app = build_router(Arc::new(state));

    tracing::info!(
        "Starting calculator server on {}, timeout {}s",
        addr,
        config.timeout_secs
    );
    tracing::info!(
        "CORS: {}, Metrics: {}, Docs: {}",
        config.enable_cors,
        config.metrics_enabled,
        config.docs_enabled
    );
    if config.docs_enabled {
        tracing::info!("API docs at {}{}", config.public_url(), docs::DOCS_PATH);
    }

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
