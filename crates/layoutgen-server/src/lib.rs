//! HTTP service for layoutgen.
//!
//! Exposes the pipeline over two routes:
//!
//! - `POST /generate` — run the pipeline for `{prompt, options?}`
//! - `GET /health` — liveness probe
//!
//! The binary in `main.rs` loads settings, builds the engine and serves
//! [`router`]. Tests drive the same router in-process.

pub mod dto;
pub mod error;
pub mod handlers;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::routing::{get, post};
use axum::Router;
use layoutgen_engine::PipelineEngine;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared server state accessible from all handlers.
pub struct ServerState {
    pub engine: PipelineEngine,
}

impl ServerState {
    pub fn new(engine: PipelineEngine) -> Self {
        Self { engine }
    }
}

/// Builds the application router with tracing and CORS layers.
pub fn router(state: Arc<ServerState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
                version = ?req.version(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    let logged_routes = Router::new()
        .route("/generate", post(handlers::generate::generate))
        .layer(trace_layer);

    Router::new()
        .merge(logged_routes)
        .route("/health", get(handlers::health))
        .layer(cors)
        .with_state(state)
}
