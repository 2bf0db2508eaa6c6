//! # API Module
//!
//! HTTP transport for the HashPilot MCP server, used when the server is
//! started with `--http` instead of stdio.
//!
//! ## Available Endpoints
//! - `GET /api/health` - liveness plus the configured networks
//! - `POST /api/rpc` - MCP JSON-RPC requests (same methods as stdio)

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::AppState;

pub mod health;
pub mod rpc;

/// Builds the HTTP application with all routes nested under `/api`.
pub fn create_router(state: AppState) -> Router {
    let api_router = Router::new()
        .route("/health", get(health::health_handler))
        // JSON-RPC endpoint for MCP tool calls
        .route("/rpc", post(rpc::rpc_handler));

    Router::new()
        .nest("/api", api_router)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
