// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP transport: REST routes plus the tool-call endpoint.

pub mod http;
pub mod mcp;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the axum `Router` with all registry routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(http::health))
        // Registry
        .route("/api/v1/agents", post(http::publish_agent).get(http::list_agents))
        .route("/api/v1/agents/{name}", get(http::get_agent))
        .route("/api/v1/resolve", get(http::resolve_agent))
        // Tool-call protocol
        .route("/mcp", post(mcp::handle_rpc))
        .fallback(http::unknown_route)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
