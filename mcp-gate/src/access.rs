// mcp-gate/src/access.rs
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use tracing::debug;

use mcp_gate_types::constants::{kinds, params};
use mcp_gate_types::{ResourceRequestNotice, ToolResult};

use crate::approval::is_auto_approved;
use crate::catalog::{find_server, match_resource};
use crate::host::{ApprovalChannel, ErrorSink, ServerRegistry, SettingsSource};
use crate::render::{collect_images, render_text, to_tool_result};

/// Context label attached to surfaced errors
const ERROR_CONTEXT: &str = "accessing MCP resource";

/// One resource-access invocation as issued by the agent.
///
/// Parameters are optional because tool calls stream in incrementally;
/// `partial` marks an invocation whose parameters are not final yet.
#[derive(Debug, Clone, Default)]
pub struct AccessRequest {
    pub server_name: Option<String>,
    pub uri: Option<String>,
    pub partial: bool,
}

/// Builder for [`ResourceAccessor`]
#[derive(Default)]
pub struct ResourceAccessorBuilder {
    approval: Option<Arc<dyn ApprovalChannel>>,
    registry: Option<Arc<dyn ServerRegistry>>,
    settings: Option<Arc<dyn SettingsSource>>,
    errors: Option<Arc<dyn ErrorSink>>,
}

impl ResourceAccessorBuilder {
    /// Create a new accessor builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the approval channel
    pub fn with_approval(mut self, approval: Arc<dyn ApprovalChannel>) -> Self {
        self.approval = Some(approval);
        self
    }

    /// Set the provider registry
    pub fn with_registry(mut self, registry: Arc<dyn ServerRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Set the settings source
    pub fn with_settings(mut self, settings: Arc<dyn SettingsSource>) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Set the error sink
    pub fn with_error_sink(mut self, errors: Arc<dyn ErrorSink>) -> Self {
        self.errors = Some(errors);
        self
    }

    /// Build the accessor
    pub fn build(self) -> Result<ResourceAccessor> {
        Ok(ResourceAccessor {
            approval: self.approval.ok_or_else(|| anyhow!("Approval channel is required"))?,
            registry: self.registry.ok_or_else(|| anyhow!("Server registry is required"))?,
            settings: self.settings.ok_or_else(|| anyhow!("Settings source is required"))?,
            errors: self.errors.ok_or_else(|| anyhow!("Error sink is required"))?,
            consecutive_mistakes: AtomicU32::new(0),
        })
    }
}

/// Gate and execute resource accesses against registered MCP providers.
///
/// Each call to [`access`](Self::access) runs one cooperative async
/// sequence: echo or validate the streamed parameters, resolve the URI
/// against the provider's catalog, auto-approve or ask, fetch, render.
pub struct ResourceAccessor {
    approval: Arc<dyn ApprovalChannel>,
    registry: Arc<dyn ServerRegistry>,
    settings: Arc<dyn SettingsSource>,
    errors: Arc<dyn ErrorSink>,
    consecutive_mistakes: AtomicU32,
}

impl ResourceAccessor {
    /// Create a new accessor builder
    pub fn builder() -> ResourceAccessorBuilder {
        ResourceAccessorBuilder::new()
    }

    /// How many invocations in a row arrived with unusable parameters
    pub fn consecutive_mistake_count(&self) -> u32 {
        self.consecutive_mistakes.load(Ordering::SeqCst)
    }

    /// Run one resource-access attempt.
    ///
    /// Returns the tool result to hand back to the agent, or `None` when
    /// the attempt produced no output: a partial echo, a declined
    /// approval, or an error already routed to the sink.
    pub async fn access(&self, request: AccessRequest) -> Option<ToolResult> {
        match self.try_access(&request).await {
            Ok(outcome) => outcome,
            Err(error) => {
                self.errors.handle_error(ERROR_CONTEXT, error).await;
                None
            }
        }
    }

    async fn try_access(&self, request: &AccessRequest) -> Result<Option<ToolResult>> {
        if request.partial {
            let notice = ResourceRequestNotice::new(
                request.server_name.as_deref(),
                request.uri.as_deref(),
            )
            .to_json()?;
            // Progress echo only; failures carry no meaning here
            let _ = self
                .approval
                .ask(kinds::USE_MCP_SERVER, &notice, true)
                .await;
            return Ok(None);
        }

        let Some(server_name) = request.server_name.as_deref() else {
            return Ok(Some(self.missing_parameter(params::SERVER_NAME).await?));
        };
        let Some(uri) = request.uri.as_deref() else {
            return Ok(Some(self.missing_parameter(params::URI).await?));
        };
        self.consecutive_mistakes.store(0, Ordering::SeqCst);

        let notice = ResourceRequestNotice::new(Some(server_name), Some(uri)).to_json()?;

        // Switches are re-read every invocation; user edits take effect
        // on the next attempt
        let settings = self.settings.auto_approve_settings().await?;
        let servers = self.registry.all_servers();
        let matched = find_server(&servers, server_name).and_then(|s| match_resource(s, uri));

        if is_auto_approved(&settings, matched.as_ref()) {
            debug!(server = server_name, uri, "resource access auto-approved");
        } else {
            let approved = self
                .approval
                .ask(kinds::USE_MCP_SERVER, &notice, false)
                .await?;
            if !approved {
                debug!(server = server_name, uri, "resource access declined");
                return Ok(None);
            }
        }

        self.approval
            .say(kinds::MCP_SERVER_REQUEST_STARTED, None, &[])
            .await?;

        let result = self.registry.read_resource(server_name, uri).await?;

        let text = render_text(&result.contents);
        let images = collect_images(&result.contents);
        self.approval
            .say(kinds::MCP_SERVER_RESPONSE, Some(&text), &images)
            .await?;

        Ok(Some(to_tool_result(text, images)))
    }

    async fn missing_parameter(&self, parameter: &str) -> Result<ToolResult> {
        self.consecutive_mistakes.fetch_add(1, Ordering::SeqCst);
        self.approval
            .say(
                kinds::ERROR,
                Some(&format!(
                    "Tried to access an MCP resource without value for required parameter '{}'. Retrying...",
                    parameter
                )),
                &[],
            )
            .await?;
        Ok(ToolResult::error(format!(
            "Missing value for required parameter '{}'. Please retry with complete response.",
            parameter
        )))
    }
}
