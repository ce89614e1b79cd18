//! Protocol middleware.
//!
//! Post-processes responses to protocol requests:
//!
//! ```text
//! no X-Inertia           → passthrough, response untouched
//! GET + stale version    → X-Inertia-Location: <path>, nothing else applied
//! 302 + PUT/PATCH/DELETE → 303
//! otherwise              → Vary: Accept, X-Inertia: true
//! ```
//!
//! Install with `axum::middleware::from_fn_with_state`.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{OriginalUri, State},
    http::{header, HeaderValue, Method, Request, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::config::InertiaConfig;
use crate::inertia::headers::{self, X_INERTIA, X_INERTIA_LOCATION, X_INERTIA_VERSION};
use crate::observability::metrics;

/// State for the protocol middleware: the current asset version.
#[derive(Debug, Clone)]
pub struct InertiaMiddlewareState {
    asset_version: Arc<str>,
}

impl InertiaMiddlewareState {
    pub fn new(asset_version: impl Into<Arc<str>>) -> Self {
        Self {
            asset_version: asset_version.into(),
        }
    }

    pub fn from_config(config: &InertiaConfig) -> Self {
        Self::new(config.asset_version.as_str())
    }

    pub fn asset_version(&self) -> &str {
        &self.asset_version
    }

    /// A GET whose version header is missing or differs byte-wise is stale.
    fn is_stale(&self, method: &Method, client_version: Option<&[u8]>) -> bool {
        method == Method::GET && client_version != Some(self.asset_version.as_bytes())
    }
}

pub async fn inertia_middleware(
    State(state): State<InertiaMiddlewareState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    // 1. Plain browser requests pass straight through.
    if !headers::is_inertia_request(req.headers()) {
        return next.run(req).await;
    }

    let method = req.method().clone();
    let path = req
        .extensions()
        .get::<OriginalUri>()
        .map(|original| &original.0)
        .unwrap_or(req.uri())
        .path()
        .to_string();
    let client_version =
        headers::header_bytes(req.headers(), &X_INERTIA_VERSION).map(<[u8]>::to_vec);

    // 2. Delegate.
    let mut response = next.run(req).await;

    // 3. Stale assets: ask the client for a full reload at this path.
    if state.is_stale(&method, client_version.as_deref()) {
        tracing::debug!(
            path = %path,
            client_version = ?client_version.as_deref().map(String::from_utf8_lossy),
            server_version = %state.asset_version,
            "Asset version mismatch, forcing full reload"
        );
        metrics::record_version_mismatch();
        match HeaderValue::from_str(&path) {
            Ok(location) => {
                response.headers_mut().append(X_INERTIA_LOCATION, location);
            }
            Err(e) => tracing::warn!(path = %path, error = %e, "Unrepresentable reload location"),
        }
        return response;
    }

    // 4. A 302 after PUT/PATCH/DELETE would replay the method on redirect.
    if response.status() == StatusCode::FOUND
        && matches!(method, Method::PUT | Method::PATCH | Method::DELETE)
    {
        tracing::debug!(method = %method, path = %path, "Rewriting 302 to 303");
        metrics::record_redirect_rewrite();
        *response.status_mut() = StatusCode::SEE_OTHER;
    }

    // 5. Tag.
    let headers = response.headers_mut();
    headers.insert(header::VARY, HeaderValue::from_static("Accept"));
    headers.insert(X_INERTIA, HeaderValue::from_static("true"));
    response
}
