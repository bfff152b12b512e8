// mcp-gate/src/template.rs
use regex::Regex;
use thiserror::Error;

/// Error raised when a URI template cannot be compiled
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("invalid uri template '{template}': {source}")]
    Pattern {
        template: String,
        #[source]
        source: regex::Error,
    },
}

// Placeholder markers survive the literal-escaping pass untouched;
// control characters are not regex metacharacters and do not occur in URIs.
const MARK_SINGLE: char = '\u{1}';
const MARK_ONE_OR_MORE: char = '\u{2}';
const MARK_ZERO_OR_MORE: char = '\u{3}';

/// A compiled URI template.
///
/// Placeholder cardinality follows a trailing-character convention on the
/// parameter name: `{path*}` matches zero or more path segments, `{path+}`
/// one or more, and `{id}` exactly one (no embedded `/`). A bare `*` in the
/// literal text matches anything. A template without placeholders or
/// wildcards behaves as exact string equality.
#[derive(Debug, Clone)]
pub struct UriTemplate {
    raw: String,
    pattern: Regex,
}

impl UriTemplate {
    /// Compile a template string into a matcher predicate
    pub fn compile(template: &str) -> Result<Self, TemplateError> {
        let marked = mark_placeholders(template);
        let escaped = escape_literals(&marked);

        // Markers become their regex fragments, then bare wildcards that
        // were escaped as ordinary literals are restored.
        let body = escaped
            .replace(MARK_ZERO_OR_MORE, ".*")
            .replace(MARK_ONE_OR_MORE, ".+")
            .replace(MARK_SINGLE, "[^/]+")
            .replace("\\*", ".*");

        let pattern = Regex::new(&format!("^{}$", body)).map_err(|source| {
            TemplateError::Pattern {
                template: template.to_string(),
                source,
            }
        })?;

        Ok(Self {
            raw: template.to_string(),
            pattern,
        })
    }

    /// Test a candidate URI for a full match
    pub fn matches(&self, uri: &str) -> bool {
        self.pattern.is_match(uri)
    }

    /// The original template string
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

/// Replace every `{name}` placeholder with its cardinality marker.
///
/// The first `}` terminates a placeholder; `{}` and an unterminated `{`
/// are kept as literal text.
fn mark_placeholders(template: &str) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        match rest[open + 1..].find('}') {
            Some(close) if close > 0 => {
                let name = &rest[open + 1..open + 1 + close];
                out.push_str(&rest[..open]);
                if name.ends_with('*') {
                    out.push(MARK_ZERO_OR_MORE);
                } else if name.ends_with('+') {
                    out.push(MARK_ONE_OR_MORE);
                } else {
                    out.push(MARK_SINGLE);
                }
                rest = &rest[open + 1 + close + 1..];
            }
            _ => {
                out.push_str(&rest[..=open]);
                rest = &rest[open + 1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Escape the regex metacharacters of the literal template parts
fn escape_literals(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(
            ch,
            '.' | '*' | '+' | '?' | '^' | '$' | '{' | '}' | '(' | ')' | '|' | '[' | ']' | '\\'
        ) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
