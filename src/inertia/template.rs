//! Root template rendering.
//!
//! The root template is the HTML document served on a first visit. It is
//! read from disk at render time and has the template context bound into it
//! through two placeholder forms:
//!
//! ```text
//! {{ name }}     value, HTML-escaped
//! {{{ name }}}   value, inserted as-is
//! ```
//!
//! Available names are `page`, `css`, `js`, and `props.<key>[.<key>...]`.
//! String values render as their text, `null` as nothing, any other JSON
//! value as compact JSON. A `props.` path the current page does not carry
//! renders as nothing; any other unknown name is an error.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::inertia::error::InertiaError;

/// Explicit bindings available to the root template.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateContext {
    /// HTML-safe JSON encoding of the whole page.
    pub page: String,
    pub css: String,
    pub js: String,
    /// Resolved page props, for server-side use in the document head.
    pub props: Map<String, Value>,
}

impl TemplateContext {
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "page" => Some(Cow::Borrowed(&self.page)),
            "css" => Some(Cow::Borrowed(&self.css)),
            "js" => Some(Cow::Borrowed(&self.js)),
            _ => {
                let path = name.strip_prefix("props.")?;
                let mut segments = path.split('.');
                let mut current = self.props.get(segments.next()?)?;
                for segment in segments {
                    current = match current {
                        Value::Object(map) => map.get(segment)?,
                        Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                        _ => return None,
                    };
                }
                Some(match current {
                    Value::Null => Cow::Borrowed(""),
                    Value::String(s) => Cow::Borrowed(s.as_str()),
                    other => Cow::Owned(other.to_string()),
                })
            }
        }
    }
}

/// Handle to the root template file.
#[derive(Debug, Clone)]
pub struct RootTemplate {
    path: PathBuf,
}

impl RootTemplate {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the template and render it with `context`.
    pub fn render(&self, context: &TemplateContext) -> Result<String, InertiaError> {
        let source = std::fs::read_to_string(&self.path).map_err(|source| {
            InertiaError::RootTemplate {
                path: self.path.clone(),
                source,
            }
        })?;
        render_str(&source, context)
    }
}

/// Render template `source` with `context`.
pub fn render_str(source: &str, context: &TemplateContext) -> Result<String, InertiaError> {
    let mut out = String::with_capacity(source.len() + context.page.len());
    let mut rest = source;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start..];

        let (raw, open_len, close) = if after_open.starts_with("{{{") {
            (true, 3, "}}}")
        } else {
            (false, 2, "}}")
        };

        let body = &after_open[open_len..];
        let end = body.find(close).ok_or_else(|| {
            InertiaError::Template(format!(
                "unterminated tag at byte {}",
                source.len() - rest.len() + start
            ))
        })?;

        let name = body[..end].trim();
        let value = match context.lookup(name) {
            Some(value) => value,
            // Pages differ in which props they carry.
            None if name.starts_with("props.") => Cow::Borrowed(""),
            None => return Err(InertiaError::Template(format!("unknown binding `{name}`"))),
        };

        if raw {
            out.push_str(&value);
        } else {
            escape_html_into(&mut out, &value);
        }

        rest = &body[end + close.len()..];
    }

    out.push_str(rest);
    Ok(out)
}

fn escape_html_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
}
