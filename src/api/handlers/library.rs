//! Listing handlers for manga, chapters and pages.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::api::{ApiError, ApiState};

/// Query for `/api/chapters`.
#[derive(Deserialize)]
pub struct ChaptersQuery {
    #[serde(default)]
    pub manga: Option<String>,
}

/// Query for `/api/pages`.
#[derive(Deserialize)]
pub struct PagesQuery {
    #[serde(default)]
    pub manga: Option<String>,
    #[serde(default)]
    pub chapter: Option<String>,
}

/// List manga titles. Empty when the library root is missing.
pub async fn list_manga(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<String>>, ApiError> {
    let manga = state.index.run_blocking(|index| index.list_manga()).await?;
    Ok(Json(manga))
}

/// List chapters of one manga.
pub async fn list_chapters(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ChaptersQuery>,
) -> Result<Json<Vec<String>>, ApiError> {
    let manga = query.manga.unwrap_or_default();
    let chapters = state
        .index
        .run_blocking(move |index| index.list_chapters(&manga))
        .await?;
    Ok(Json(chapters))
}

/// List page files of one chapter, already in reading order.
pub async fn list_pages(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<PagesQuery>,
) -> Result<Json<Vec<String>>, ApiError> {
    let manga = query.manga.unwrap_or_default();
    let chapter = query.chapter.unwrap_or_default();
    let pages = state
        .index
        .run_blocking(move |index| index.list_pages(&manga, &chapter))
        .await?;
    Ok(Json(pages))
}
