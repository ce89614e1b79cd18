//! Page rendering.
//!
//! # Responsibilities
//! - Merge handler props with request-scoped common props
//! - Build the page object (partial reloads, deferred props)
//! - Answer protocol requests with JSON, first visits with the root document
//!
//! # Design Decisions
//! - Only `Content-Type` is set here; protocol headers belong to the middleware
//! - Configuration is fixed at construction and never mutated

use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::config::InertiaConfig;
use crate::inertia::error::InertiaResult;
use crate::inertia::escape::to_html_safe_json;
use crate::inertia::page::{build_page, Page};
use crate::inertia::props::Props;
use crate::inertia::request::InertiaRequest;
use crate::inertia::template::{RootTemplate, TemplateContext};
use crate::observability::metrics;

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_HTML: &str = "text/html; charset=UTF-8";

/// Server-side page renderer.
#[derive(Debug, Clone)]
pub struct Inertia {
    root_template: RootTemplate,
    asset_version: String,
    js: String,
    css: String,
}

impl Inertia {
    pub fn new(
        root_template: impl Into<std::path::PathBuf>,
        asset_version: impl Into<String>,
        js: impl Into<String>,
        css: impl Into<String>,
    ) -> Self {
        Self {
            root_template: RootTemplate::new(root_template),
            asset_version: asset_version.into(),
            js: js.into(),
            css: css.into(),
        }
    }

    pub fn from_config(config: &InertiaConfig) -> Self {
        Self::new(
            &config.root_template,
            &config.asset_version,
            &config.js,
            &config.css,
        )
    }

    pub fn asset_version(&self) -> &str {
        &self.asset_version
    }

    /// Render `component` as JSON for protocol requests, HTML otherwise.
    pub fn render(
        &self,
        request: &InertiaRequest,
        component: &str,
        mut props: Props,
    ) -> InertiaResult<Response> {
        props.merge_common(request.common_props());

        let page = self.get_page(request, component, props)?;

        if request.is_inertia() {
            let body = serde_json::to_vec(&page)?;
            tracing::debug!(component = %page.component, url = %page.url, "Rendering page as JSON");
            metrics::record_response("json");
            return Ok(([(header::CONTENT_TYPE, CONTENT_TYPE_JSON)], body).into_response());
        }

        let context = self.root_tpl_vars(page)?;
        let html = self.fetch_root_tpl(&context)?;
        tracing::debug!(component = %component, "Rendering root document");
        metrics::record_response("html");
        Ok(([(header::CONTENT_TYPE, CONTENT_TYPE_HTML)], html).into_response())
    }

    /// Build the page object for `component`. `props` must already include
    /// any common props.
    pub fn get_page(
        &self,
        request: &InertiaRequest,
        component: &str,
        props: Props,
    ) -> InertiaResult<Page> {
        Ok(build_page(request, component, props, &self.asset_version)?)
    }

    /// Template bindings for the root document.
    pub fn root_tpl_vars(&self, page: Page) -> InertiaResult<TemplateContext> {
        Ok(TemplateContext {
            page: to_html_safe_json(&page)?,
            css: self.css.clone(),
            js: self.js.clone(),
            props: page.props,
        })
    }

    /// Render the root template with `context`.
    pub fn fetch_root_tpl(&self, context: &TemplateContext) -> InertiaResult<String> {
        self.root_template.render(context)
    }
}
