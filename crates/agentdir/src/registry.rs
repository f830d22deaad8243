// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-lifetime agent registry keyed by name.

use std::fmt;

use indexmap::map::Entry;
use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::card::{agent_uri, parse_agent_uri, AgentRecord, CardPayload};
use crate::state::epoch_ms;

/// Failures of registry operations. All are caused by the caller's input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// `publish` for a name that is already registered.
    DuplicateName(String),
    /// `get`/`resolve` for a name that is not registered.
    NotFound(String),
    /// `publish` with an empty name.
    EmptyName,
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateName(name) => {
                write!(f, "agent with the same name already registered: {name}")
            }
            Self::NotFound(name) => write!(f, "agent {name} not found"),
            Self::EmptyName => f.write_str("agent name must not be empty"),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Name-keyed store of published agent cards.
///
/// Entries are append-only: there is no update or delete. A single lock
/// guards the check-and-insert in [`publish`](Self::publish), so concurrent
/// publishes of one name yield exactly one winner.
#[derive(Default)]
pub struct AgentRegistry {
    agents: RwLock<IndexMap<String, AgentRecord>>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `card` under `name` and return its canonical address.
    pub fn publish(&self, name: &str, card: CardPayload) -> Result<String, RegistryError> {
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }

        let mut agents = self.agents.write();
        match agents.entry(name.to_owned()) {
            Entry::Occupied(_) => Err(RegistryError::DuplicateName(name.to_owned())),
            Entry::Vacant(slot) => {
                slot.insert(AgentRecord {
                    name: name.to_owned(),
                    card,
                    registered_at_ms: epoch_ms(),
                });
                Ok(agent_uri(name))
            }
        }
    }

    /// Snapshot of every registered agent, in publish order.
    pub fn list(&self) -> Vec<AgentRecord> {
        self.agents.read().values().cloned().collect()
    }

    /// Canonical addresses of every registered agent.
    pub fn uris(&self) -> Vec<String> {
        self.agents.read().keys().map(|name| agent_uri(name)).collect()
    }

    pub fn get(&self, name: &str) -> Result<AgentRecord, RegistryError> {
        self.agents
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(name.to_owned()))
    }

    /// Look up an agent by its `agent://{name}` address.
    ///
    /// A URI outside the `agent://` scheme cannot name a registered agent and
    /// fails the same way as an unregistered name.
    pub fn resolve(&self, uri: &str) -> Result<AgentRecord, RegistryError> {
        match parse_agent_uri(uri) {
            Some(name) => self.get(name),
            None => Err(RegistryError::NotFound(uri.to_owned())),
        }
    }

    pub fn len(&self) -> usize {
        self.agents.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.read().is_empty()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
