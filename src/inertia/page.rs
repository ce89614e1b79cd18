//! Page object construction.
//!
//! # Data Flow
//! ```text
//! handler props ∪ common props
//!     → partial reload projection (X-Inertia-Partial-*)
//!     → deferred prop resolution
//!     → Page { component, props, url, version }
//! ```

use std::collections::HashSet;

use axum::http::HeaderMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::inertia::headers::{header_str, X_INERTIA_PARTIAL_COMPONENT, X_INERTIA_PARTIAL_DATA};
use crate::inertia::props::Props;
use crate::inertia::request::InertiaRequest;

/// The page object exchanged with the client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub component: String,
    pub props: Map<String, Value>,
    pub url: String,
    pub version: String,
}

/// A partial reload request parsed from headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialReload {
    /// Requested prop keys.
    pub only: HashSet<String>,
    /// Component the request was issued against, if sent.
    pub component: Option<String>,
}

impl PartialReload {
    /// Parse the partial reload headers.
    ///
    /// An absent, empty, or whitespace-only key list means no partial reload.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let data = header_str(headers, &X_INERTIA_PARTIAL_DATA)?;
        let only: HashSet<String> = data
            .split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .collect();

        if only.is_empty() {
            return None;
        }

        Some(Self {
            only,
            component: header_str(headers, &X_INERTIA_PARTIAL_COMPONENT).map(str::to_string),
        })
    }

    /// A partial reload only applies to the component it was issued against.
    pub fn applies_to(&self, component: &str) -> bool {
        self.component.as_deref() == Some(component)
    }
}

/// Build the page for `component` from already-merged `props`.
///
/// Filtering runs strictly before resolution so deferred props outside the
/// requested subset are never evaluated.
pub fn build_page(
    request: &InertiaRequest,
    component: &str,
    mut props: Props,
    version: &str,
) -> Result<Page, serde_json::Error> {
    if let Some(partial) = PartialReload::from_headers(&request.headers) {
        if partial.applies_to(component) {
            tracing::debug!(
                component = %component,
                requested = partial.only.len(),
                "Applying partial reload"
            );
            props.retain_keys(&partial.only);
        } else {
            tracing::debug!(
                component = %component,
                partial_component = ?partial.component,
                "Ignoring partial reload for a different component"
            );
        }
    }

    Ok(Page {
        component: component.to_string(),
        props: props.resolve()?,
        url: request.target.clone(),
        version: version.to_string(),
    })
}
