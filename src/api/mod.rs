//! REST API for the library server.
//!
//! Provides HTTP endpoints for:
//! - Manga, chapter and page listings
//! - Page image streaming
//! - Health status
//!
//! Static client assets are served from an optional public directory for
//! any path the API does not claim.

pub mod error;
pub mod handlers;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::library::LibraryIndex;

pub use error::ApiError;

/// Shared state for API handlers.
pub struct ApiState {
    /// Index over the library root.
    pub index: LibraryIndex,

    /// Static asset directory, if any.
    pub public_dir: Option<PathBuf>,
}

impl ApiState {
    /// Create API state from server configuration.
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            index: LibraryIndex::new(config.library_root.clone()),
            public_dir: config.public_dir.clone(),
        }
    }
}

/// Build the API router with all routes.
pub fn router(state: Arc<ApiState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/api/status", get(handlers::status::health))
        .route("/api/manga", get(handlers::library::list_manga))
        .route("/api/chapters", get(handlers::library::list_chapters))
        .route("/api/pages", get(handlers::library::list_pages))
        .route("/img", get(handlers::image::serve_page));

    if let Some(dir) = &state.public_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                })
                // Only log requests/responses that are NOT 2xx
                .on_request(())
                .on_response(|response: &axum::http::Response<_>, latency: std::time::Duration, _span: &tracing::Span| {
                    let status = response.status();
                    if !status.is_success() {
                        tracing::warn!(
                            status = %status,
                            latency_ms = latency.as_millis(),
                            "request failed"
                        );
                    }
                })
        )
        .with_state(state)
}

/// Start the API server.
pub async fn serve(state: Arc<ApiState>, bind_addr: &str) -> anyhow::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;

    tracing::info!("Tankobon listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
