// mcp-gate/src/host.rs
use anyhow::Result;
use async_trait::async_trait;

use mcp_gate_types::{AutoApproveSettings, ReadResourceResult, Server};

/// Channel to the host's conversation surface.
///
/// `ask` doubles as the streaming progress echo (`partial = true`, result
/// ignored) and the real approval request (`partial = false`, resolved
/// boolean is authoritative).
#[async_trait]
pub trait ApprovalChannel: Send + Sync {
    /// Request approval, or echo streaming progress when `partial`
    async fn ask(&self, kind: &str, message: &str, partial: bool) -> Result<bool>;

    /// Emit an observability notification to the host
    async fn say(&self, kind: &str, text: Option<&str>, images: &[String]) -> Result<()>;
}

/// Registry of connected MCP providers
#[async_trait]
pub trait ServerRegistry: Send + Sync {
    /// Synchronous snapshot of every registered provider
    fn all_servers(&self) -> Vec<Server>;

    /// Fetch a resource from the named provider
    async fn read_resource(&self, server_name: &str, uri: &str) -> Result<ReadResourceResult>;
}

/// Source of the host's auto-approval switches.
///
/// Consulted on every invocation; the switches can change between calls
/// through user settings edits.
#[async_trait]
pub trait SettingsSource: Send + Sync {
    async fn auto_approve_settings(&self) -> Result<AutoApproveSettings>;
}

/// Sink for errors that terminate an access attempt
#[async_trait]
pub trait ErrorSink: Send + Sync {
    async fn handle_error(&self, context: &str, error: anyhow::Error);
}
