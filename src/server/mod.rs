//! Prediction service: an axum application exposing `/`, `/ping` and
//! `/predict`.
//!
//! - `handlers`: route handlers and multipart extraction
//! - `dto`: JSON request/response types

pub mod dto;
pub mod handlers;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::{Request, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::classifier::DiseaseClassifier;
use crate::config::ServiceConfig;
use crate::remedy_store::RemedyStore;

/// Immutable state shared by every request
pub struct AppState {
    pub classifier: Arc<dyn DiseaseClassifier>,
    pub remedies: RemedyStore,
}

impl AppState {
    pub fn new(classifier: Arc<dyn DiseaseClassifier>, remedies: RemedyStore) -> Self {
        Self {
            classifier,
            remedies,
        }
    }
}

/// Build the application router
pub fn router(state: Arc<AppState>, max_upload_bytes: usize) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    Router::new()
        .route("/", get(handlers::root))
        .route("/ping", get(handlers::ping))
        .route("/predict", post(handlers::predict))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(trace_layer)
        .with_state(state)
}

/// Bind the configured address and serve until ctrl-c
pub async fn serve(config: &ServiceConfig, state: Arc<AppState>) -> Result<()> {
    let app = router(state, config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("Prediction service listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server terminated unexpectedly")?;

    info!("Prediction service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
