// mcp-gate-types/src/types/notice.rs
use serde::{Deserialize, Serialize};

use crate::constants::kinds;

/// JSON payload echoed to the host when a resource access starts.
///
/// On streamed partial invocations the fields may still be absent;
/// absent fields are omitted from the serialized form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceRequestNotice {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(rename = "serverName")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

impl ResourceRequestNotice {
    /// Create a notice for the given (possibly still streaming) parameters
    pub fn new(server_name: Option<&str>, uri: Option<&str>) -> Self {
        Self {
            kind: kinds::USE_MCP_SERVER.to_string(),
            server_name: server_name.map(|s| s.to_string()),
            uri: uri.map(|s| s.to_string()),
        }
    }

    /// Serialize to the JSON string the host surface expects
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_are_omitted() {
        let notice = ResourceRequestNotice::new(Some("docs"), None);
        let json = notice.to_json().unwrap();
        assert_eq!(json, r#"{"type":"use_mcp_server","serverName":"docs"}"#);
    }

    #[test]
    fn complete_notice_carries_both_fields() {
        let notice = ResourceRequestNotice::new(Some("docs"), Some("memo://guide/intro"));
        let json = notice.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"type":"use_mcp_server","serverName":"docs","uri":"memo://guide/intro"}"#
        );
    }
}
