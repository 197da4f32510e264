//! Page image streaming.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::Response,
};
use serde::Deserialize;
use tokio_util::io::ReaderStream;

use crate::api::{error, ApiState};

/// Query for `/img`.
#[derive(Deserialize)]
pub struct ImageQuery {
    #[serde(default)]
    pub manga: Option<String>,
    #[serde(default)]
    pub chapter: Option<String>,
    #[serde(default)]
    pub file: Option<String>,
}

/// Stream one page file.
///
/// The body reads the file in chunks as the client consumes it. If the
/// client goes away the body is dropped, which drops the stream and closes
/// the file.
pub async fn serve_page(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ImageQuery>,
) -> Result<Response, (StatusCode, String)> {
    let manga = query.manga.unwrap_or_default();
    let chapter = query.chapter.unwrap_or_default();
    let file = query.file.unwrap_or_default();

    let page = state
        .index
        .open_page(&manga, &chapter, &file)
        .await
        .map_err(error::plain)?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, page.content_type)
        .header(header::CONTENT_LENGTH, page.len)
        .header(header::CACHE_CONTROL, "public, max-age=3600")
        .body(Body::from_stream(ReaderStream::new(page.file)))
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to build image response");
            (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
        })
}
