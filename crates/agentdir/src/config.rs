// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::Parser;

/// Default instructions advertised to tool-call clients on `initialize`.
pub const DEFAULT_INSTRUCTIONS: &str =
    "This server lets agents register their agent cards and discover other registered agents.";

/// Agent discovery registry.
#[derive(Debug, Clone, Parser)]
#[command(name = "agentdir", version, about)]
pub struct AppConfig {
    /// Host to bind on.
    #[arg(long, default_value = "127.0.0.1", env = "AGENTDIR_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 6969, env = "AGENTDIR_PORT")]
    pub port: u16,

    /// Log filter directive (e.g. `info`, `agentdir=debug`).
    #[arg(long, default_value = "info", env = "AGENTDIR_LOG_LEVEL")]
    pub log_level: String,

    /// Log output format: `text` or `json`.
    #[arg(long, default_value = "text", env = "AGENTDIR_LOG_FORMAT")]
    pub log_format: String,

    /// Server name reported to tool-call clients.
    #[arg(long, default_value = "Agent discovery", env = "AGENTDIR_NAME")]
    pub name: String,

    /// Usage instructions reported to tool-call clients.
    #[arg(long, default_value = DEFAULT_INSTRUCTIONS, env = "AGENTDIR_INSTRUCTIONS")]
    pub instructions: String,
}

impl AppConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.host.trim().is_empty() {
            anyhow::bail!("--host must not be empty");
        }
        match self.log_format.as_str() {
            "text" | "json" => Ok(()),
            other => anyhow::bail!("invalid log format: {other} (expected text or json)"),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
