// mcp-gate/src/render.rs
use mcp_gate_types::{ContentItem, ToolResult};

/// Fallback text when a fetch returns no usable text content
pub const EMPTY_RESPONSE: &str = "(Empty response)";

/// Concatenate the non-empty text items with a blank line between them
pub fn render_text(contents: &[ContentItem]) -> String {
    let texts: Vec<&str> = contents
        .iter()
        .filter_map(|item| item.text.as_deref())
        .filter(|text| !text.is_empty())
        .collect();

    if texts.is_empty() {
        EMPTY_RESPONSE.to_string()
    } else {
        texts.join("\n\n")
    }
}

/// Collect image payloads as `data:` URIs, in content order.
///
/// An item qualifies when its MIME type starts with `image` and it carries
/// a non-empty blob. Blobs already carrying a `data:` prefix pass through
/// unchanged.
pub fn collect_images(contents: &[ContentItem]) -> Vec<String> {
    contents
        .iter()
        .filter_map(|item| {
            let mime_type = item.mime_type.as_deref()?;
            if !mime_type.starts_with("image") {
                return None;
            }
            let blob = item.blob.as_deref().filter(|b| !b.is_empty())?;
            if blob.starts_with("data:") {
                Some(blob.to_string())
            } else {
                Some(format!("data:{};base64,{}", mime_type, blob))
            }
        })
        .collect()
}

/// Bundle rendered text and images into the tool-result payload
pub fn to_tool_result(text: String, images: Vec<String>) -> ToolResult {
    if images.is_empty() {
        ToolResult::text(text)
    } else {
        ToolResult::with_images(text, images)
    }
}
