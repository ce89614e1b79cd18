//! HTML-safe JSON encoding for the page payload.
//!
//! The encoded page ends up inside a `data-page` attribute or a `<script>`
//! block, so string contents must not carry raw quotes, apostrophes, markup
//! characters, or non-ASCII codepoints. All of them become `\uXXXX` escapes,
//! which any JSON parser decodes back to the original text.

use serde::Serialize;

/// Serialize `value` to JSON with HTML-sensitive characters escaped.
pub fn to_html_safe_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(value)?;
    Ok(escape_json_strings(&json))
}

/// Rewrite string contents of already-valid JSON text.
///
/// Tracks whether the cursor is inside a JSON string. Structural quotes are
/// left alone; an escaped `\"` inside a string becomes `"`.
fn escape_json_strings(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut in_string = false;
    let mut chars = json.chars();

    while let Some(ch) = chars.next() {
        if !in_string {
            if ch == '"' {
                in_string = true;
            }
            out.push(ch);
            continue;
        }

        match ch {
            '\\' => match chars.next() {
                Some('"') => out.push_str("\\u0022"),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push('\\'),
            },
            '"' => {
                in_string = false;
                out.push(ch);
            }
            '\'' | '<' | '>' | '&' => push_unicode_escape(&mut out, ch as u32),
            c if (c as u32) > 0x7F => {
                let mut buf = [0u16; 2];
                for unit in c.encode_utf16(&mut buf) {
                    push_unicode_escape(&mut out, u32::from(*unit));
                }
            }
            c => out.push(c),
        }
    }
    out
}

fn push_unicode_escape(out: &mut String, code: u32) {
    out.push_str(&format!("\\u{code:04x}"));
}
