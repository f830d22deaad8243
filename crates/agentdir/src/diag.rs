// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Side channel for reporting failed operations back to operators.

/// Receives a message each time a request-level operation fails.
///
/// Injected into [`AppState`](crate::state::AppState); handlers call it, the
/// registry never does.
pub trait DiagnosticSink: Send + Sync {
    fn error(&self, op: &str, message: &str);
}

/// Default sink: forwards to `tracing` at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn error(&self, op: &str, message: &str) {
        tracing::warn!(op, "{message}");
    }
}
