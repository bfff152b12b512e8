// mcp-gate-types/src/types/mod.rs
pub mod notice;
pub mod resource;
pub mod server;
pub mod settings;
pub mod tool;

pub use notice::ResourceRequestNotice;
pub use resource::{ContentItem, ReadResourceResult, Resource, ResourceTemplate};
pub use server::Server;
pub use settings::AutoApproveSettings;
pub use tool::{ToolContent, ToolResult};
