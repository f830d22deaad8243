// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent card payloads, registry records, and the `agent://` addressing scheme.

use serde::{Deserialize, Serialize};

/// URI scheme prefix for a single registered agent.
pub const AGENT_URI_PREFIX: &str = "agent://";

/// URI of the collection resource listing every registered agent.
pub const AGENTS_COLLECTION_URI: &str = "agents://";

/// Descriptor published for an agent.
///
/// The registry stores and returns this value exactly as published. Producers
/// either send a JSON object (conventionally a `name` plus a `locator`,
/// `agent_card_url` or `url` the consumer dereferences) or an arbitrary string
/// such as embedded JSON text or a bare URL. Object keys keep their order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CardPayload {
    Opaque(String),
    Object(serde_json::Map<String, serde_json::Value>),
}

impl CardPayload {
    /// Build an object card `{"name": ..., "locator": ...}`.
    pub fn structured(name: impl Into<String>, locator: impl Into<String>) -> Self {
        let mut card = serde_json::Map::new();
        card.insert("name".to_owned(), serde_json::Value::String(name.into()));
        card.insert("locator".to_owned(), serde_json::Value::String(locator.into()));
        Self::Object(card)
    }

    /// Build an opaque card.
    pub fn opaque(text: impl Into<String>) -> Self {
        Self::Opaque(text.into())
    }
}

/// One registered agent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentRecord {
    pub name: String,
    pub card: CardPayload,
    /// Epoch millis of the successful publish.
    pub registered_at_ms: u64,
}

impl AgentRecord {
    /// Canonical address of this record.
    pub fn uri(&self) -> String {
        agent_uri(&self.name)
    }
}

/// Canonical address for an agent name: `agent://{name}`.
pub fn agent_uri(name: &str) -> String {
    format!("{AGENT_URI_PREFIX}{name}")
}

/// Extract the agent name from an `agent://{name}` URI.
///
/// Returns `None` for other schemes and for an empty name.
pub fn parse_agent_uri(uri: &str) -> Option<&str> {
    uri.strip_prefix(AGENT_URI_PREFIX).filter(|name| !name.is_empty())
}

#[cfg(test)]
#[path = "card_tests.rs"]
mod tests;
