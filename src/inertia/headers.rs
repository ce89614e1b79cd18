//! Protocol header names.
//!
//! Header names are lowercase so they can be used directly as
//! `HeaderName::from_static` inputs.

use axum::http::{HeaderMap, HeaderName, HeaderValue};

/// Marks a request issued by the client-side router. Presence is the signal.
pub const X_INERTIA: HeaderName = HeaderName::from_static("x-inertia");

/// Asset version the client was built against.
pub const X_INERTIA_VERSION: HeaderName = HeaderName::from_static("x-inertia-version");

/// Comma-separated prop keys requested by a partial reload.
pub const X_INERTIA_PARTIAL_DATA: HeaderName = HeaderName::from_static("x-inertia-partial-data");

/// Component the partial reload was issued against.
pub const X_INERTIA_PARTIAL_COMPONENT: HeaderName =
    HeaderName::from_static("x-inertia-partial-component");

/// Full-reload target sent back on an asset version mismatch.
pub const X_INERTIA_LOCATION: HeaderName = HeaderName::from_static("x-inertia-location");

/// Returns true if the request carries the protocol marker header.
pub fn is_inertia_request(headers: &HeaderMap) -> bool {
    headers.contains_key(X_INERTIA)
}

/// Raw header value bytes.
pub fn header_bytes<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<&'a [u8]> {
    headers.get(name).map(HeaderValue::as_bytes)
}

/// Header value decoded as UTF-8; absent or non-UTF-8 values yield `None`.
pub fn header_str<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<&'a str> {
    header_bytes(headers, name).and_then(|bytes| std::str::from_utf8(bytes).ok())
}
