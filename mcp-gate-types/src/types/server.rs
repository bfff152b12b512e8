// mcp-gate-types/src/types/server.rs
use serde::{Deserialize, Serialize};

use super::resource::{Resource, ResourceTemplate};

/// Snapshot of one connected capability provider.
///
/// `resources` and `resource_templates` keep catalog-declaration order;
/// lookups rely on that order, not on any sorting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    /// Name, unique within the active registry
    pub name: String,

    /// Whether the user switched this provider off without
    /// disconnecting it
    #[serde(default)]
    pub disabled: bool,

    /// Concrete resources, in declared order
    #[serde(default)]
    pub resources: Vec<Resource>,

    /// Resource templates, in declared order
    #[serde(rename = "resourceTemplates", default)]
    pub resource_templates: Vec<ResourceTemplate>,
}
