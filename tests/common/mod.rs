//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::io::Write;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use inertia_server::Inertia;
use tempfile::NamedTempFile;

pub const VERSION: &str = "v1";

pub const ROOT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head><title>{{ props.title }}</title><link href="{{ css }}" rel="stylesheet"></head>
<body><div id="app" data-page="{{ page }}"></div><script src="{{ js }}"></script></body>
</html>
"#;

/// Write `contents` to a temporary root template.
pub fn write_template(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

/// Renderer over a temporary copy of `ROOT_TEMPLATE`. Keep the returned file
/// alive for as long as the renderer is used.
pub fn renderer() -> (Arc<Inertia>, NamedTempFile) {
    let template = write_template(ROOT_TEMPLATE);
    let inertia = Inertia::new(template.path(), VERSION, "/build/app.js", "/build/app.css");
    (Arc::new(inertia), template)
}

/// Protocol request carrying the current asset version.
pub fn inertia_request(method: &str, uri: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("X-Inertia", "true")
        .header("X-Inertia-Version", VERSION)
}

pub fn empty(builder: axum::http::request::Builder) -> Request<Body> {
    builder.body(Body::empty()).unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

/// Undo the HTML attribute escaping applied to `{{ page }}`.
pub fn unescape_attr(s: &str) -> String {
    s.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Extract and decode the `data-page` attribute from a root document.
pub fn data_page(html: &str) -> serde_json::Value {
    let start = html.find("data-page=\"").unwrap() + "data-page=\"".len();
    let end = start + html[start..].find('"').unwrap();
    serde_json::from_str(&unescape_attr(&html[start..end])).unwrap()
}
