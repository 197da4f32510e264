//! Status and health check handlers.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::api::ApiState;

/// Health response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,

    /// Library root on the server.
    pub library_root: String,

    /// Whether the library root is an existing directory.
    pub library_present: bool,

    /// Number of manga titles currently in the library.
    pub manga_count: usize,
}

/// Health check endpoint.
pub async fn health(State(state): State<Arc<ApiState>>) -> Json<HealthResponse> {
    let library_present = tokio::fs::metadata(state.index.root())
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false);

    let manga_count = state
        .index
        .run_blocking(|index| index.list_manga())
        .await
        .map(|manga| manga.len())
        .unwrap_or_default();

    Json(HealthResponse {
        status: "ok".to_string(),
        library_root: state.index.root().display().to_string(),
        library_present,
        manga_count,
    })
}
