// mcp-gate/src/lib.rs
pub mod access;
pub mod approval;
pub mod catalog;
pub mod host;
pub mod render;
pub mod template;

pub use access::{AccessRequest, ResourceAccessor, ResourceAccessorBuilder};
pub use catalog::CatalogMatch;
pub use host::{ApprovalChannel, ErrorSink, ServerRegistry, SettingsSource};
pub use template::{TemplateError, UriTemplate};
