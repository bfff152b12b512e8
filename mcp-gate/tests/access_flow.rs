use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use pretty_assertions::assert_eq;

use mcp_gate::{
    AccessRequest, ApprovalChannel, ErrorSink, ResourceAccessor, ServerRegistry, SettingsSource,
};
use mcp_gate_types::{
    AutoApproveSettings, ContentItem, ReadResourceResult, Resource, ResourceTemplate, Server,
    ToolContent,
};

/// Shared, ordered record of every observable collaborator interaction
type EventLog = Arc<Mutex<Vec<String>>>;

struct ScriptedChannel {
    log: EventLog,
    approve: bool,
}

#[async_trait]
impl ApprovalChannel for ScriptedChannel {
    async fn ask(&self, kind: &str, message: &str, partial: bool) -> Result<bool> {
        self.log
            .lock()
            .unwrap()
            .push(format!("ask:{}:{}:{}", kind, partial, message));
        Ok(self.approve)
    }

    async fn say(&self, kind: &str, text: Option<&str>, images: &[String]) -> Result<()> {
        self.log.lock().unwrap().push(format!(
            "say:{}:{}:{}",
            kind,
            text.unwrap_or(""),
            images.join(",")
        ));
        Ok(())
    }
}

struct StubRegistry {
    log: EventLog,
    servers: Vec<Server>,
    result: Option<ReadResourceResult>,
}

#[async_trait]
impl ServerRegistry for StubRegistry {
    fn all_servers(&self) -> Vec<Server> {
        self.servers.clone()
    }

    async fn read_resource(&self, server_name: &str, uri: &str) -> Result<ReadResourceResult> {
        self.log
            .lock()
            .unwrap()
            .push(format!("fetch:{}:{}", server_name, uri));
        self.result
            .clone()
            .ok_or_else(|| anyhow!("provider connection lost"))
    }
}

struct CountingSettings {
    settings: AutoApproveSettings,
    reads: AtomicU32,
}

#[async_trait]
impl SettingsSource for CountingSettings {
    async fn auto_approve_settings(&self) -> Result<AutoApproveSettings> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.settings.clone())
    }
}

#[derive(Default)]
struct RecordingSink {
    errors: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl ErrorSink for RecordingSink {
    async fn handle_error(&self, context: &str, error: anyhow::Error) {
        self.errors
            .lock()
            .unwrap()
            .push((context.to_string(), error.to_string()));
    }
}

fn allow_all_settings() -> AutoApproveSettings {
    AutoApproveSettings {
        auto_approval_enabled: Some(true),
        always_allow_mcp: Some(true),
        ..Default::default()
    }
}

fn docs_server() -> Server {
    Server {
        name: "docs".to_string(),
        disabled: false,
        resources: vec![Resource {
            uri: "memo://guide/intro".to_string(),
            name: Some("Intro".to_string()),
            description: None,
            mime_type: Some("text/plain".to_string()),
            always_allow: true,
        }],
        resource_templates: vec![ResourceTemplate {
            uri_template: "memo://notes/{date}".to_string(),
            name: Some("Daily note".to_string()),
            description: None,
            mime_type: Some("text/markdown".to_string()),
            always_allow: true,
        }],
    }
}

fn text_result(texts: &[&str]) -> ReadResourceResult {
    ReadResourceResult {
        contents: texts
            .iter()
            .map(|t| ContentItem {
                text: Some(t.to_string()),
                ..Default::default()
            })
            .collect(),
    }
}

struct Fixture {
    accessor: ResourceAccessor,
    log: EventLog,
    settings: Arc<CountingSettings>,
    sink: Arc<RecordingSink>,
}

fn fixture(
    approve: bool,
    settings: AutoApproveSettings,
    servers: Vec<Server>,
    result: Option<ReadResourceResult>,
) -> Fixture {
    let log: EventLog = Arc::new(Mutex::new(Vec::new()));
    let counting = Arc::new(CountingSettings {
        settings,
        reads: AtomicU32::new(0),
    });
    let sink = Arc::new(RecordingSink::default());
    let accessor = ResourceAccessor::builder()
        .with_approval(Arc::new(ScriptedChannel {
            log: log.clone(),
            approve,
        }))
        .with_registry(Arc::new(StubRegistry {
            log: log.clone(),
            servers,
            result,
        }))
        .with_settings(counting.clone())
        .with_error_sink(sink.clone())
        .build()
        .unwrap();
    Fixture {
        accessor,
        log,
        settings: counting,
        sink,
    }
}

fn request(server_name: &str, uri: &str) -> AccessRequest {
    AccessRequest {
        server_name: Some(server_name.to_string()),
        uri: Some(uri.to_string()),
        partial: false,
    }
}

fn events(log: &EventLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

#[tokio::test]
async fn partial_invocation_only_echoes_progress() {
    let f = fixture(true, allow_all_settings(), vec![docs_server()], None);
    let outcome = f
        .accessor
        .access(AccessRequest {
            server_name: Some("docs".to_string()),
            uri: None,
            partial: true,
        })
        .await;

    assert!(outcome.is_none());
    let log = events(&f.log);
    assert_eq!(log.len(), 1);
    assert_eq!(
        log[0],
        r#"ask:use_mcp_server:true:{"type":"use_mcp_server","serverName":"docs"}"#
    );
    assert!(f.sink.errors.lock().unwrap().is_empty());
}

#[tokio::test]
async fn missing_server_name_yields_structured_result_without_fetch() {
    let f = fixture(true, allow_all_settings(), vec![docs_server()], None);
    let outcome = f
        .accessor
        .access(AccessRequest {
            server_name: None,
            uri: Some("memo://guide/intro".to_string()),
            partial: false,
        })
        .await
        .unwrap();

    assert_eq!(outcome.is_error, Some(true));
    assert!(outcome.text_content().contains("server_name"));
    assert_eq!(f.accessor.consecutive_mistake_count(), 1);
    assert!(events(&f.log).iter().all(|e| !e.starts_with("fetch:")));
}

#[tokio::test]
async fn missing_uri_yields_structured_result_without_fetch() {
    let f = fixture(true, allow_all_settings(), vec![docs_server()], None);
    let outcome = f
        .accessor
        .access(AccessRequest {
            server_name: Some("docs".to_string()),
            uri: None,
            partial: false,
        })
        .await
        .unwrap();

    assert_eq!(outcome.is_error, Some(true));
    assert!(outcome.text_content().contains("uri"));
    assert!(events(&f.log).iter().all(|e| !e.starts_with("fetch:")));
}

#[tokio::test]
async fn mistake_counter_resets_on_valid_parameters() {
    let f = fixture(
        true,
        allow_all_settings(),
        vec![docs_server()],
        Some(text_result(&["ok"])),
    );
    f.accessor
        .access(AccessRequest {
            server_name: None,
            uri: None,
            partial: false,
        })
        .await;
    assert_eq!(f.accessor.consecutive_mistake_count(), 1);

    f.accessor
        .access(request("docs", "memo://guide/intro"))
        .await;
    assert_eq!(f.accessor.consecutive_mistake_count(), 0);
}

#[tokio::test]
async fn auto_approved_access_skips_the_ask() {
    let f = fixture(
        false, // would decline if asked; must never be asked
        allow_all_settings(),
        vec![docs_server()],
        Some(text_result(&["A", "B"])),
    );
    let outcome = f
        .accessor
        .access(request("docs", "memo://guide/intro"))
        .await
        .unwrap();

    let log = events(&f.log);
    assert!(log.iter().all(|e| !e.starts_with("ask:")));
    assert_eq!(
        log,
        vec![
            "say:mcp_server_request_started::".to_string(),
            "fetch:docs:memo://guide/intro".to_string(),
            "say:mcp_server_response:A\n\nB:".to_string(),
        ]
    );
    assert_eq!(
        outcome.content,
        vec![ToolContent::Text {
            text: "A\n\nB".to_string()
        }]
    );
}

#[tokio::test]
async fn template_match_drives_auto_approval() {
    let f = fixture(
        false,
        allow_all_settings(),
        vec![docs_server()],
        Some(text_result(&["note"])),
    );
    let outcome = f
        .accessor
        .access(request("docs", "memo://notes/2026-08-06"))
        .await;

    assert!(outcome.is_some());
    assert!(events(&f.log).iter().all(|e| !e.starts_with("ask:")));
}

#[tokio::test]
async fn disabled_master_switch_routes_through_the_ask() {
    let settings = AutoApproveSettings {
        auto_approval_enabled: Some(false),
        always_allow_mcp: Some(true),
        ..Default::default()
    };
    let f = fixture(
        true,
        settings,
        vec![docs_server()],
        Some(text_result(&["ok"])),
    );
    let outcome = f
        .accessor
        .access(request("docs", "memo://guide/intro"))
        .await;

    assert!(outcome.is_some());
    let log = events(&f.log);
    assert!(log[0].starts_with("ask:use_mcp_server:false:"));
    assert!(log.iter().any(|e| e.starts_with("fetch:")));
}

#[tokio::test]
async fn declined_approval_is_a_silent_no_op() {
    let f = fixture(
        false,
        AutoApproveSettings::default(),
        vec![docs_server()],
        Some(text_result(&["never seen"])),
    );
    let outcome = f
        .accessor
        .access(request("docs", "memo://guide/intro"))
        .await;

    assert!(outcome.is_none());
    let log = events(&f.log);
    assert_eq!(log.len(), 1);
    assert!(log[0].starts_with("ask:"));
    assert!(f.sink.errors.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_server_can_still_be_fetched_after_approval() {
    let f = fixture(
        true,
        allow_all_settings(),
        vec![docs_server()],
        Some(text_result(&["ok"])),
    );
    let outcome = f
        .accessor
        .access(request("other", "custom://thing"))
        .await;

    assert!(outcome.is_some());
    let log = events(&f.log);
    // No catalog match, so the human was asked; the fetch then proceeds
    // with the raw URI
    assert!(log[0].starts_with("ask:"));
    assert!(log.contains(&"fetch:other:custom://thing".to_string()));
}

#[tokio::test]
async fn disabled_server_is_never_auto_approved() {
    let mut server = docs_server();
    server.disabled = true;
    let f = fixture(
        true,
        allow_all_settings(),
        vec![server],
        Some(text_result(&["ok"])),
    );
    f.accessor
        .access(request("docs", "memo://guide/intro"))
        .await;

    assert!(events(&f.log)[0].starts_with("ask:"));
}

#[tokio::test]
async fn request_started_precedes_the_fetch() {
    let f = fixture(
        true,
        allow_all_settings(),
        vec![docs_server()],
        Some(text_result(&["ok"])),
    );
    f.accessor
        .access(request("docs", "memo://guide/intro"))
        .await;

    let log = events(&f.log);
    let started = log
        .iter()
        .position(|e| e.starts_with("say:mcp_server_request_started"))
        .unwrap();
    let fetched = log.iter().position(|e| e.starts_with("fetch:")).unwrap();
    assert!(started < fetched);
}

#[tokio::test]
async fn fetch_failure_is_routed_to_the_error_sink() {
    let f = fixture(true, allow_all_settings(), vec![docs_server()], None);
    let outcome = f
        .accessor
        .access(request("docs", "memo://guide/intro"))
        .await;

    assert!(outcome.is_none());
    let errors = f.sink.errors.lock().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].0, "accessing MCP resource");
    assert!(errors[0].1.contains("provider connection lost"));
    // No response notification after a failed fetch
    assert!(events(&f.log)
        .iter()
        .all(|e| !e.starts_with("say:mcp_server_response")));
}

#[tokio::test]
async fn response_bundles_text_and_images() {
    let result = ReadResourceResult {
        contents: vec![
            ContentItem {
                text: Some("caption".to_string()),
                ..Default::default()
            },
            ContentItem {
                mime_type: Some("image/png".to_string()),
                blob: Some("XYZ".to_string()),
                ..Default::default()
            },
        ],
    };
    let f = fixture(true, allow_all_settings(), vec![docs_server()], Some(result));
    let outcome = f
        .accessor
        .access(request("docs", "memo://guide/intro"))
        .await
        .unwrap();

    assert!(outcome.has_images());
    assert_eq!(
        outcome.content,
        vec![
            ToolContent::Text {
                text: "caption".to_string()
            },
            ToolContent::Image {
                data: "data:image/png;base64,XYZ".to_string()
            },
        ]
    );
    assert!(events(&f.log)
        .contains(&"say:mcp_server_response:caption:data:image/png;base64,XYZ".to_string()));
}

#[tokio::test]
async fn empty_response_renders_the_fallback_text() {
    let f = fixture(
        true,
        allow_all_settings(),
        vec![docs_server()],
        Some(ReadResourceResult { contents: vec![] }),
    );
    let outcome = f
        .accessor
        .access(request("docs", "memo://guide/intro"))
        .await
        .unwrap();

    assert_eq!(outcome.text_content(), "(Empty response)");
}

#[tokio::test]
async fn settings_are_reread_on_every_invocation() {
    let f = fixture(
        true,
        allow_all_settings(),
        vec![docs_server()],
        Some(text_result(&["ok"])),
    );
    f.accessor
        .access(request("docs", "memo://guide/intro"))
        .await;
    f.accessor
        .access(request("docs", "memo://guide/intro"))
        .await;

    assert_eq!(f.settings.reads.load(Ordering::SeqCst), 2);
}
