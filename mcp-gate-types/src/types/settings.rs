// mcp-gate-types/src/types/settings.rs
use serde::{Deserialize, Serialize};

/// Auto-approval switches as the host persists them.
///
/// Only `auto_approval_enabled` and `always_allow_mcp` gate resource
/// access; the remaining switches cover the host's other tool classes
/// and ride along so one snapshot type serves the whole settings
/// surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoApproveSettings {
    /// Master switch for every auto-approval
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_approval_enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub always_allow_read_only: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub always_allow_write: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub always_allow_execute: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub always_allow_browser: Option<bool>,

    /// Class gate for MCP tool and resource use
    #[serde(skip_serializing_if = "Option::is_none")]
    pub always_allow_mcp: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub always_approve_resubmit: Option<bool>,
}
