// mcp-gate/src/approval.rs
use mcp_gate_types::AutoApproveSettings;

use crate::catalog::CatalogMatch;

/// Decide whether a resource access may proceed without asking a human.
///
/// Three independent gates must all hold: the master auto-approval switch,
/// the MCP class gate, and the matched entry's own `alwaysAllow`. A request
/// with no catalog match is never auto-approved. The settings snapshot is
/// passed in explicitly; callers re-read it per invocation.
pub fn is_auto_approved(
    settings: &AutoApproveSettings,
    matched: Option<&CatalogMatch<'_>>,
) -> bool {
    settings.auto_approval_enabled.unwrap_or(false)
        && settings.always_allow_mcp.unwrap_or(false)
        && matched.is_some_and(|m| m.always_allow())
}
