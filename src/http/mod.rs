//! HTTP surface.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID)
//!     → inertia middleware (protocol requests)
//!     → pages.rs (handlers → renderer)
//!     → Send to client
//! ```

pub mod pages;
pub mod request;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::HttpServer;
