// Console HTTP server
// Router, shared state, and serving

mod handlers;

use anyhow::Result;
use axum::{middleware, routing::get, Router};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::metrics::{track_requests, HttpMetrics};

/// Directory holding the built frontend bundle, served in production mode.
pub const STATIC_ASSETS_DIR: &str = "build";

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub metrics: HttpMetrics,
}

/// Build the console router.
///
/// Production mode serves the frontend bundle with an SPA index fallback;
/// non-production adds a permissive CORS layer for the frontend dev server.
pub fn create_router(state: AppState) -> Router {
    let metrics = state.metrics.clone();
    let production = state.config.is_production();

    let mut router = Router::new()
        .route("/metrics", get(handlers::metrics_exposition))
        .route("/api/server_config.js", get(handlers::server_config_script))
        .route("/api/mobileservices", get(handlers::mobile_services))
        .route("/api/sdk_docs/:platform", get(handlers::sdk_docs))
        .route("/about", get(handlers::about))
        .with_state(state);

    if production {
        let assets = ServeDir::new(STATIC_ASSETS_DIR)
            .not_found_service(ServeFile::new(Path::new(STATIC_ASSETS_DIR).join("index.html")));
        router = router.fallback_service(assets);
    } else {
        router = router.layer(CorsLayer::permissive());
    }

    router
        .layer(middleware::from_fn_with_state(metrics, track_requests))
        .layer(TraceLayer::new_for_http())
}

/// The console server: configuration plus the metrics it exposes.
pub struct ConsoleServer {
    state: AppState,
}

impl ConsoleServer {
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            state: AppState {
                config: Arc::new(config),
                metrics: HttpMetrics::new()?,
            },
        })
    }

    /// The router, exposed separately so tests can drive it without a
    /// listening socket.
    pub fn router(&self) -> Router {
        create_router(self.state.clone())
    }

    pub async fn serve(self) -> Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.state.config.port));
        let app = self.router();

        tracing::info!("Listening on port {}", self.state.config.port);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;
        Ok(())
    }
}
