// mcp-gate-types/src/types/resource.rs
use serde::{Deserialize, Serialize};

use crate::constants::UNKNOWN_MIME_TYPE;

/// A concrete, exactly-addressed item a server can return
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// URI that uniquely identifies the resource
    pub uri: String,

    /// Human-readable name of the resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Optional description of the resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Optional MIME type of the resource content
    #[serde(rename = "mimeType")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    /// Whether the user pre-authorized access to this resource
    #[serde(rename = "alwaysAllow", default)]
    pub always_allow: bool,
}

impl Resource {
    /// MIME type for display purposes, with the standard fallback
    pub fn display_mime_type(&self) -> &str {
        self.mime_type.as_deref().unwrap_or(UNKNOWN_MIME_TYPE)
    }
}

/// A parametrized address pattern matching a family of resources
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceTemplate {
    /// URI template with `{name}`, `{name*}`, `{name+}` placeholders
    /// and optional bare `*` wildcards
    #[serde(rename = "uriTemplate")]
    pub uri_template: String,

    /// Human-readable name of the template
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Optional description of the template
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Optional MIME type of resources addressed by this template
    #[serde(rename = "mimeType")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    /// Whether the user pre-authorized access to resources matching
    /// this template
    #[serde(rename = "alwaysAllow", default)]
    pub always_allow: bool,
}

impl ResourceTemplate {
    /// MIME type for display purposes, with the standard fallback
    pub fn display_mime_type(&self) -> &str {
        self.mime_type.as_deref().unwrap_or(UNKNOWN_MIME_TYPE)
    }
}

/// One content item of a fetched resource, text or binary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentItem {
    /// URI of the item, when the server reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    /// MIME type of this item
    #[serde(rename = "mimeType")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    /// Text content (used for text items)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Binary content encoded as base64, with or without a `data:`
    /// URI prefix already applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blob: Option<String>,
}

/// Result of reading a resource
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadResourceResult {
    /// Contents of the resource
    pub contents: Vec<ContentItem>,
}
