use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tracing::{error, info, Level};

use mcp_gate::{
    AccessRequest, ApprovalChannel, ErrorSink, ResourceAccessor, ServerRegistry, SettingsSource,
};
use mcp_gate_types::{
    AutoApproveSettings, ContentItem, ReadResourceResult, Resource, ResourceTemplate, Server,
};

/// Approval channel that prints every exchange and always approves
struct ConsoleChannel;

#[async_trait]
impl ApprovalChannel for ConsoleChannel {
    async fn ask(&self, kind: &str, message: &str, partial: bool) -> Result<bool> {
        if partial {
            println!("[echo] {}: {}", kind, message);
        } else {
            println!("[ask]  {}: {} -> approved", kind, message);
        }
        Ok(true)
    }

    async fn say(&self, kind: &str, text: Option<&str>, images: &[String]) -> Result<()> {
        println!(
            "[say]  {}: {} ({} image(s))",
            kind,
            text.unwrap_or(""),
            images.len()
        );
        Ok(())
    }
}

/// Registry serving a single in-memory "docs" provider
struct DemoRegistry {
    servers: Vec<Server>,
}

impl DemoRegistry {
    fn new() -> Self {
        Self {
            servers: vec![Server {
                name: "docs".to_string(),
                disabled: false,
                resources: vec![Resource {
                    uri: "memo://guide/intro".to_string(),
                    name: Some("Getting started".to_string()),
                    description: Some("Introductory guide".to_string()),
                    mime_type: Some("text/plain".to_string()),
                    always_allow: true,
                }],
                resource_templates: vec![ResourceTemplate {
                    uri_template: "memo://notes/{date}".to_string(),
                    name: Some("Daily note".to_string()),
                    description: Some("One note per day".to_string()),
                    mime_type: Some("text/markdown".to_string()),
                    always_allow: false,
                }],
            }],
        }
    }
}

#[async_trait]
impl ServerRegistry for DemoRegistry {
    fn all_servers(&self) -> Vec<Server> {
        self.servers.clone()
    }

    async fn read_resource(&self, server_name: &str, uri: &str) -> Result<ReadResourceResult> {
        if server_name != "docs" {
            return Err(anyhow!("unknown provider: {}", server_name));
        }
        Ok(ReadResourceResult {
            contents: vec![ContentItem {
                uri: Some(uri.to_string()),
                mime_type: Some("text/plain".to_string()),
                text: Some(format!("Contents of {}", uri)),
                blob: None,
            }],
        })
    }
}

struct StaticSettings(AutoApproveSettings);

#[async_trait]
impl SettingsSource for StaticSettings {
    async fn auto_approve_settings(&self) -> Result<AutoApproveSettings> {
        Ok(self.0.clone())
    }
}

struct LoggingSink;

#[async_trait]
impl ErrorSink for LoggingSink {
    async fn handle_error(&self, context: &str, err: anyhow::Error) {
        error!("error while {}: {:#}", context, err);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .init();

    info!("Starting gate-demo");

    let registry = DemoRegistry::new();
    for server in registry.all_servers() {
        for resource in &server.resources {
            info!(
                "registered resource {} ({})",
                resource.uri,
                resource.display_mime_type()
            );
        }
        for template in &server.resource_templates {
            info!(
                "registered template {} ({})",
                template.uri_template,
                template.display_mime_type()
            );
        }
    }

    let accessor = ResourceAccessor::builder()
        .with_approval(Arc::new(ConsoleChannel))
        .with_registry(Arc::new(registry))
        .with_settings(Arc::new(StaticSettings(AutoApproveSettings {
            auto_approval_enabled: Some(true),
            always_allow_mcp: Some(true),
            ..Default::default()
        })))
        .with_error_sink(Arc::new(LoggingSink))
        .build()?;

    // Pre-authorized concrete resource: no ask, straight to the fetch
    let outcome = accessor
        .access(AccessRequest {
            server_name: Some("docs".to_string()),
            uri: Some("memo://guide/intro".to_string()),
            partial: false,
        })
        .await;
    if let Some(result) = outcome {
        println!("result: {}", serde_json::to_string_pretty(&result)?);
    }

    // Template match without alwaysAllow: routed through the ask
    let outcome = accessor
        .access(AccessRequest {
            server_name: Some("docs".to_string()),
            uri: Some("memo://notes/2026-08-06".to_string()),
            partial: false,
        })
        .await;
    if let Some(result) = outcome {
        println!("result: {}", serde_json::to_string_pretty(&result)?);
    }

    // Incomplete invocation: structured mistake, no fetch
    let outcome = accessor
        .access(AccessRequest {
            server_name: Some("docs".to_string()),
            uri: None,
            partial: false,
        })
        .await;
    if let Some(result) = outcome {
        println!("result: {}", serde_json::to_string_pretty(&result)?);
    }
    info!(
        "consecutive mistakes: {}",
        accessor.consecutive_mistake_count()
    );

    Ok(())
}
