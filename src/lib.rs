//! Server-side adapter for the Inertia page protocol.

pub mod config;
pub mod http;
pub mod inertia;
pub mod observability;

pub use config::schema::AppConfig;
pub use http::HttpServer;
pub use inertia::{Inertia, InertiaMiddlewareState, InertiaRequest, Prop, Props};
