// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! REST handlers for the agent registry.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{Method, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::card::{AgentRecord, CardPayload};
use crate::error::ErrorCode;
use crate::registry::RegistryError;
use crate::state::AppState;

// -- Request/Response types ---------------------------------------------------

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub agent_count: usize,
}

#[derive(Debug, Deserialize)]
pub struct PublishRequest {
    pub name: String,
    pub card: CardPayload,
}

#[derive(Debug, Serialize)]
pub struct PublishResponse {
    pub name: String,
    pub uri: String,
}

#[derive(Debug, Serialize)]
pub struct AgentInfo {
    pub name: String,
    pub uri: String,
    pub card: CardPayload,
    pub registered_at_ms: u64,
}

impl From<AgentRecord> for AgentInfo {
    fn from(record: AgentRecord) -> Self {
        Self {
            uri: record.uri(),
            name: record.name,
            card: record.card,
            registered_at_ms: record.registered_at_ms,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub uri: String,
}

// -- Handlers -----------------------------------------------------------------

/// `GET /api/v1/health`
pub async fn health(State(s): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse { status: "running".to_owned(), agent_count: s.registry.len() })
}

/// `POST /api/v1/agents`: publish an agent card.
pub async fn publish_agent(
    State(s): State<Arc<AppState>>,
    body: Result<Json<PublishRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(body) => body,
        Err(e) => return bad_request(&s, "publish", e.body_text()),
    };

    match s.registry.publish(&req.name, req.card) {
        Ok(uri) => {
            tracing::info!(agent = %req.name, %uri, "agent published");
            Json(PublishResponse { name: req.name, uri }).into_response()
        }
        Err(e) => registry_error(&s, "publish", &e),
    }
}

/// `GET /api/v1/agents`: list all registered agents.
pub async fn list_agents(State(s): State<Arc<AppState>>) -> impl IntoResponse {
    let list: Vec<AgentInfo> = s.registry.list().into_iter().map(AgentInfo::from).collect();
    Json(list)
}

/// `GET /api/v1/agents/{name}`
pub async fn get_agent(State(s): State<Arc<AppState>>, Path(name): Path<String>) -> Response {
    match s.registry.get(&name) {
        Ok(record) => Json(AgentInfo::from(record)).into_response(),
        Err(e) => registry_error(&s, "get", &e),
    }
}

/// `GET /api/v1/resolve?uri=agent://{name}`
pub async fn resolve_agent(
    State(s): State<Arc<AppState>>,
    query: Result<Query<ResolveQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(e) => return bad_request(&s, "resolve", e.body_text()),
    };

    match s.registry.resolve(&query.uri) {
        Ok(record) => Json(AgentInfo::from(record)).into_response(),
        Err(e) => registry_error(&s, "resolve", &e),
    }
}

/// Fallback for paths and methods with no route.
pub async fn unknown_route(method: Method, uri: Uri) -> Response {
    let message = format!("no route for {method} {}", uri.path());
    ErrorCode::MethodNotFound.to_http_response(message).into_response()
}

fn bad_request(s: &AppState, op: &str, message: String) -> Response {
    s.diagnostics.error(op, &message);
    ErrorCode::BadRequest.to_http_response(message).into_response()
}

fn registry_error(s: &AppState, op: &str, err: &RegistryError) -> Response {
    let message = err.to_string();
    s.diagnostics.error(op, &message);
    ErrorCode::from(err).to_http_response(message).into_response()
}
