//! Rendering errors.

use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors raised while producing a page response.
///
/// None of these are retried. Every variant surfaces as a 500 so the client
/// never receives a partially rendered page.
#[derive(Debug, Error)]
pub enum InertiaError {
    /// Root template missing or unreadable.
    #[error("root template {path:?} could not be read: {source}")]
    RootTemplate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Root template is malformed.
    #[error("invalid root template: {0}")]
    Template(String),

    /// A prop could not be encoded as JSON.
    #[error("prop serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl InertiaError {
    /// Configuration errors indicate a broken deployment rather than bad data.
    pub fn is_configuration(&self) -> bool {
        matches!(self, InertiaError::RootTemplate { .. } | InertiaError::Template(_))
    }
}

impl IntoResponse for InertiaError {
    fn into_response(self) -> Response {
        tracing::error!(
            error = %self,
            configuration = self.is_configuration(),
            "Page render failed"
        );
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

/// Result type for page rendering.
pub type InertiaResult<T> = Result<T, InertiaError>;
