// mcp-gate-types/src/constants.rs

/// Notification kinds exchanged with the host surface
pub mod kinds {
    /// Ask kind for both the streaming echo and the real approval request
    pub const USE_MCP_SERVER: &str = "use_mcp_server";

    /// Say kind emitted right before the resource fetch is issued
    pub const MCP_SERVER_REQUEST_STARTED: &str = "mcp_server_request_started";

    /// Say kind carrying the rendered response text and images
    pub const MCP_SERVER_RESPONSE: &str = "mcp_server_response";

    /// Say kind for recoverable tool mistakes (e.g. missing parameters)
    pub const ERROR: &str = "error";
}

/// Parameter names of a resource-access invocation
pub mod params {
    pub const SERVER_NAME: &str = "server_name";
    pub const URI: &str = "uri";
}

/// Display fallback when a resource carries no MIME type
pub const UNKNOWN_MIME_TYPE: &str = "Unknown";
