// mcp-gate-types/src/types/tool.rs
use serde::{Deserialize, Serialize};

/// A single content item in a tool result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ToolContent {
    #[serde(rename = "text")]
    Text { text: String },

    #[serde(rename = "image")]
    Image {
        /// Image payload as a `data:` URI
        data: String,
    },
}

/// Payload handed back to the host's tool-result channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    pub content: Vec<ToolContent>,

    #[serde(rename = "isError")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl ToolResult {
    /// Build a text-only result
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: None,
        }
    }

    /// Build a result bundling text with an ordered list of image
    /// `data:` URIs
    pub fn with_images(text: impl Into<String>, images: Vec<String>) -> Self {
        let mut content = vec![ToolContent::Text { text: text.into() }];
        content.extend(images.into_iter().map(|data| ToolContent::Image { data }));
        Self {
            content,
            is_error: None,
        }
    }

    /// Build an error result
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: message.into(),
            }],
            is_error: Some(true),
        }
    }

    /// Whether the result carries any image blocks
    pub fn has_images(&self) -> bool {
        self.content
            .iter()
            .any(|item| matches!(item, ToolContent::Image { .. }))
    }

    /// Concatenated text of all text blocks
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter_map(|item| match item {
                ToolContent::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
