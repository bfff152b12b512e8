// mcp-gate/src/catalog.rs
use tracing::warn;

use mcp_gate_types::{Resource, ResourceTemplate, Server};

use crate::template::UriTemplate;

/// The catalog entry a requested URI resolved to
#[derive(Debug, Clone, Copy)]
pub enum CatalogMatch<'a> {
    /// Exact URI equality against a concrete resource
    Exact(&'a Resource),

    /// First resource template whose pattern matched
    Templated(&'a ResourceTemplate),
}

impl CatalogMatch<'_> {
    /// Whether the matched entry is pre-authorized by the user
    pub fn always_allow(&self) -> bool {
        match self {
            CatalogMatch::Exact(resource) => resource.always_allow,
            CatalogMatch::Templated(template) => template.always_allow,
        }
    }

    /// The exact URI or template string the match was made against
    pub fn pattern(&self) -> &str {
        match self {
            CatalogMatch::Exact(resource) => &resource.uri,
            CatalogMatch::Templated(template) => &template.uri_template,
        }
    }
}

/// Find a provider by exact name equality, skipping disabled providers
pub fn find_server<'a>(servers: &'a [Server], name: &str) -> Option<&'a Server> {
    servers.iter().find(|s| !s.disabled && s.name == name)
}

/// Resolve a concrete URI against one provider's catalog.
///
/// Concrete resources are consulted first (exact equality); only when none
/// matches are templates compiled and tested, in declared order. The result
/// is deterministic for a given snapshot and input.
pub fn match_resource<'a>(server: &'a Server, uri: &str) -> Option<CatalogMatch<'a>> {
    if let Some(resource) = server.resources.iter().find(|r| r.uri == uri) {
        return Some(CatalogMatch::Exact(resource));
    }

    server
        .resource_templates
        .iter()
        .find(|template| match UriTemplate::compile(&template.uri_template) {
            Ok(matcher) => matcher.matches(uri),
            Err(error) => {
                warn!(
                    server = %server.name,
                    template = %template.uri_template,
                    %error,
                    "skipping uncompilable resource template"
                );
                false
            }
        })
        .map(CatalogMatch::Templated)
}
