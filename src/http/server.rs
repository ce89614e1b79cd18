//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all page handlers
//! - Wire up middleware (protocol, common props, tracing, timeout, request ID)
//! - Bind server to listener and shut down gracefully

use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::http::pages::{self, AppState};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::inertia::{inertia_middleware, Inertia, InertiaMiddlewareState};

/// HTTP server for the page protocol.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        let state = AppState {
            inertia: Arc::new(Inertia::from_config(&config.inertia)),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Layers run outermost-last: request ID and tracing see every request,
    /// the protocol middleware wraps the handlers, and common props are
    /// attached just before a handler runs.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        let protocol = InertiaMiddlewareState::from_config(&config.inertia);

        Router::new()
            .route("/", get(pages::home))
            .route("/users", get(pages::users_index))
            .route(
                "/users/{id}",
                get(pages::users_show)
                    .put(pages::users_mutate)
                    .patch(pages::users_mutate)
                    .delete(pages::users_mutate),
            )
            .route("/users/{id}/touch", post(pages::users_mutate))
            .with_state(state)
            .layer(middleware::from_fn(pages::share_common_props))
            .layer(middleware::from_fn_with_state(protocol, inertia_middleware))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// The assembled router, for embedding or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            asset_version = %self.config.inertia.asset_version,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
