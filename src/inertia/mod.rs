//! Server-side page protocol adapter.
//!
//! # Data Flow
//! ```text
//! request
//!     → middleware.rs (protocol requests only)
//!         → handler
//!             → renderer.rs
//!                 → page.rs (merge, partial reload, deferred props)
//!                 → X-Inertia: JSON page
//!                 → otherwise: template.rs root document
//!     ← middleware.rs (stale version, 302→303, protocol headers)
//! ```

pub mod error;
pub mod escape;
pub mod headers;
pub mod middleware;
pub mod page;
pub mod props;
pub mod renderer;
pub mod request;
pub mod template;

pub use error::{InertiaError, InertiaResult};
pub use middleware::{inertia_middleware, InertiaMiddlewareState};
pub use page::{Page, PartialReload};
pub use props::{CommonProps, Prop, Props};
pub use renderer::Inertia;
pub use request::InertiaRequest;
pub use template::{RootTemplate, TemplateContext};
