// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tool-call endpoint: JSON-RPC 2.0 over a single HTTP POST.
//!
//! Exposes the registry as three tools (`publish_card`, `list_cards`,
//! `get_agent`) and as read-only resources addressed by `agent://{name}`.
//! Each request gets exactly one JSON response; notifications get `202`.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::card::{CardPayload, AGENTS_COLLECTION_URI, AGENT_URI_PREFIX};
use crate::config::AppConfig;
use crate::error::ErrorCode;
use crate::registry::{AgentRegistry, RegistryError};
use crate::state::AppState;

pub const PROTOCOL_VERSION: &str = "2025-03-26";

const PARSE_ERROR: i64 = -32700;
const INVALID_REQUEST: i64 = -32600;

// -- Wire types ---------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct RpcRequest {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub params: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct RpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl RpcResponse {
    fn new(id: Value, outcome: Result<Value, RpcError>) -> Self {
        let (result, error) = match outcome {
            Ok(v) => (Some(v), None),
            Err(e) => (None, Some(e)),
        };
        Self { jsonrpc: "2.0", id, result, error }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl RpcError {
    fn new(code: i64, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    fn from_code(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(code.jsonrpc_code(), message)
    }

    fn invalid_params(message: impl Into<String>) -> Self {
        Self::from_code(ErrorCode::BadRequest, message)
    }
}

impl From<&RegistryError> for RpcError {
    fn from(err: &RegistryError) -> Self {
        Self::from_code(ErrorCode::from(err), err.to_string())
    }
}

impl From<serde_json::Error> for RpcError {
    fn from(err: serde_json::Error) -> Self {
        Self::from_code(ErrorCode::Internal, format!("serialization failed: {err}"))
    }
}

#[derive(Debug, Deserialize)]
struct CallToolParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ReadResourceParams {
    uri: String,
}

#[derive(Debug, Deserialize)]
struct PublishArgs {
    name: String,
    card: CardPayload,
}

#[derive(Debug, Deserialize)]
struct NameArgs {
    name: String,
}

// -- Handler ------------------------------------------------------------------

/// `POST /mcp`
pub async fn handle_rpc(State(s): State<Arc<AppState>>, body: Bytes) -> Response {
    let raw: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            return reply(Value::Null, Err(RpcError::new(PARSE_ERROR, format!("parse error: {e}"))))
        }
    };
    let req: RpcRequest = match serde_json::from_value(raw) {
        Ok(req) => req,
        Err(e) => {
            return reply(
                Value::Null,
                Err(RpcError::new(INVALID_REQUEST, format!("invalid request: {e}"))),
            )
        }
    };

    let id = req.id.clone().unwrap_or(Value::Null);
    if req.jsonrpc.as_deref() != Some("2.0") {
        return reply(id, Err(RpcError::new(INVALID_REQUEST, "jsonrpc must be \"2.0\"")));
    }
    let Some(method) = req.method else {
        return reply(id, Err(RpcError::new(INVALID_REQUEST, "missing method")));
    };
    let Some(id) = req.id else {
        tracing::debug!(%method, "notification");
        return StatusCode::ACCEPTED.into_response();
    };

    let outcome = dispatch(&s, &method, req.params.unwrap_or(Value::Null));
    if let Err(ref e) = outcome {
        s.diagnostics.error(&method, &e.message);
    }
    reply(id, outcome)
}

fn reply(id: Value, outcome: Result<Value, RpcError>) -> Response {
    Json(RpcResponse::new(id, outcome)).into_response()
}

fn dispatch(s: &AppState, method: &str, params: Value) -> Result<Value, RpcError> {
    match method {
        "initialize" => Ok(initialize(&s.config)),
        "ping" => Ok(json!({})),
        "tools/list" => Ok(json!({ "tools": tool_definitions() })),
        "tools/call" => call_tool(s, parse_params(params)?),
        "resources/templates/list" => Ok(json!({
            "resourceTemplates": [{
                "uriTemplate": format!("{AGENT_URI_PREFIX}{{name}}"),
                "name": "agent",
                "description": "Card of a registered agent",
                "mimeType": "application/json",
            }]
        })),
        "resources/list" => Ok(list_resources(&s.registry)),
        "resources/read" => read_resource(s, parse_params(params)?),
        other => Err(RpcError::from_code(
            ErrorCode::MethodNotFound,
            format!("method not found: {other}"),
        )),
    }
}

fn parse_params<T: DeserializeOwned>(params: Value) -> Result<T, RpcError> {
    serde_json::from_value(params)
        .map_err(|e| RpcError::invalid_params(format!("invalid params: {e}")))
}

fn initialize(config: &AppConfig) -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": {},
            "resources": {},
        },
        "serverInfo": {
            "name": config.name,
            "version": env!("CARGO_PKG_VERSION"),
        },
        "instructions": config.instructions,
    })
}

/// Tool descriptors advertised by `tools/list`.
pub fn tool_definitions() -> Value {
    json!([
        {
            "name": "publish_card",
            "description": "Publish an agent card. Returns the agent's agent:// address.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "name": { "type": "string", "description": "Agent name" },
                    "card": {
                        "description":
                            "Agent card: JSON text, a URL, or any JSON object, \
                             conventionally with name and locator",
                        "oneOf": [{ "type": "string" }, { "type": "object" }]
                    }
                },
                "required": ["name", "card"]
            }
        },
        {
            "name": "list_cards",
            "description": "List all registered agent cards keyed by agent name.",
            "inputSchema": { "type": "object", "properties": {} }
        },
        {
            "name": "get_agent",
            "description": "Return the registered card for an agent name.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "name": { "type": "string", "description": "Agent name" }
                },
                "required": ["name"]
            }
        }
    ])
}

// -- Tools --------------------------------------------------------------------

fn call_tool(s: &AppState, params: CallToolParams) -> Result<Value, RpcError> {
    let args = params.arguments.unwrap_or_else(|| json!({}));
    match params.name.as_str() {
        "publish_card" => {
            let args: PublishArgs = parse_params(args)?;
            match s.registry.publish(&args.name, args.card) {
                Ok(uri) => {
                    tracing::info!(agent = %args.name, %uri, "agent published");
                    Ok(tool_ok(uri.clone(), json!({ "name": args.name, "uri": uri })))
                }
                Err(e) => Ok(tool_error(s, "publish_card", &e)),
            }
        }
        "list_cards" => {
            let cards = s
                .registry
                .list()
                .into_iter()
                .map(|r| Ok::<_, serde_json::Error>((r.name, serde_json::to_value(r.card)?)))
                .collect::<Result<serde_json::Map<String, Value>, serde_json::Error>>()?;
            let cards = Value::Object(cards);
            Ok(tool_ok(serde_json::to_string(&cards)?, cards))
        }
        "get_agent" => {
            let args: NameArgs = parse_params(args)?;
            match s.registry.get(&args.name) {
                Ok(record) => {
                    let record = serde_json::to_value(record)?;
                    Ok(tool_ok(serde_json::to_string(&record)?, record))
                }
                Err(e) => Ok(tool_error(s, "get_agent", &e)),
            }
        }
        other => Err(RpcError::invalid_params(format!("unknown tool: {other}"))),
    }
}

fn tool_ok(text: String, structured: Value) -> Value {
    json!({
        "content": [{ "type": "text", "text": text }],
        "structuredContent": structured,
        "isError": false,
    })
}

/// Registry failures are tool-level errors, not protocol errors.
fn tool_error(s: &AppState, tool: &str, err: &RegistryError) -> Value {
    let message = err.to_string();
    s.diagnostics.error(tool, &message);
    json!({
        "content": [{ "type": "text", "text": message }],
        "isError": true,
    })
}

// -- Resources ----------------------------------------------------------------

fn list_resources(registry: &AgentRegistry) -> Value {
    let mut resources: Vec<Value> = registry
        .list()
        .into_iter()
        .map(|record| {
            json!({ "uri": record.uri(), "name": record.name, "mimeType": "application/json" })
        })
        .collect();
    resources.push(json!({
        "uri": AGENTS_COLLECTION_URI,
        "name": "agents",
        "description": "Addresses of all registered agents",
        "mimeType": "application/json",
    }));
    json!({ "resources": resources })
}

fn read_resource(s: &AppState, params: ReadResourceParams) -> Result<Value, RpcError> {
    let text = if params.uri == AGENTS_COLLECTION_URI {
        serde_json::to_string(&s.registry.uris())?
    } else {
        let record = s.registry.resolve(&params.uri).map_err(|e| RpcError::from(&e))?;
        serde_json::to_string(&record)?
    };
    Ok(json!({
        "contents": [{
            "uri": params.uri,
            "mimeType": "application/json",
            "text": text,
        }]
    }))
}

#[cfg(test)]
#[path = "mcp_tests.rs"]
mod tests;
