// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use crate::config::AppConfig;
use crate::diag::{DiagnosticSink, TracingSink};
use crate::registry::AgentRegistry;

/// Shared server state, built once in [`run`](crate::run) and handed to every handler.
pub struct AppState {
    pub registry: Arc<AgentRegistry>,
    pub config: AppConfig,
    pub diagnostics: Arc<dyn DiagnosticSink>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            registry: Arc::new(AgentRegistry::new()),
            config,
            diagnostics: Arc::new(TracingSink),
        }
    }

    /// Replace the diagnostic sink.
    pub fn with_diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = sink;
        self
    }
}

/// Return current epoch millis.
pub fn epoch_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
