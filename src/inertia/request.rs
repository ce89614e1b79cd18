//! Request metadata consumed by the page renderer.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, OriginalUri};
use axum::http::request::Parts;
use axum::http::{HeaderMap, Method, Uri};

use crate::inertia::headers;
use crate::inertia::props::{CommonProps, Props};

/// The slice of an incoming request the renderer needs.
///
/// Usable as an axum extractor; never rejects.
#[derive(Debug, Clone)]
pub struct InertiaRequest {
    pub method: Method,
    pub headers: HeaderMap,
    /// Path plus query, as the client requested it.
    pub target: String,
    pub common_props: Option<CommonProps>,
}

impl InertiaRequest {
    /// Capture request metadata from already-split request parts.
    ///
    /// Prefers `OriginalUri` so nested routers still report the full target.
    pub fn from_parts(parts: &Parts) -> Self {
        let uri = parts
            .extensions
            .get::<OriginalUri>()
            .map(|original| &original.0)
            .unwrap_or(&parts.uri);

        Self {
            method: parts.method.clone(),
            headers: parts.headers.clone(),
            target: request_target(uri),
            common_props: parts.extensions.get::<CommonProps>().cloned(),
        }
    }

    pub fn is_inertia(&self) -> bool {
        headers::is_inertia_request(&self.headers)
    }

    /// Shared props attached by upstream middleware, or an empty set.
    pub fn common_props(&self) -> Props {
        self.common_props
            .as_ref()
            .map(CommonProps::props)
            .unwrap_or_default()
    }
}

impl<S> FromRequestParts<S> for InertiaRequest
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}

/// Path and query of `uri`; `/` when the URI carries neither.
pub fn request_target(uri: &Uri) -> String {
    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/".to_string())
}
