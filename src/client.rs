//! HTTP client for a running tankobon server.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

/// Errors talking to the server.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Status { status: StatusCode, message: String },
}

/// Server health, as reported by `/api/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusReport {
    pub status: String,
    pub library_root: String,
    pub library_present: bool,
    pub manga_count: usize,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Thin wrapper over the JSON endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub async fn status(&self) -> Result<StatusReport, ClientError> {
        self.get_json("/api/status", &[]).await
    }

    pub async fn manga(&self) -> Result<Vec<String>, ClientError> {
        self.get_json("/api/manga", &[]).await
    }

    pub async fn chapters(&self, manga: &str) -> Result<Vec<String>, ClientError> {
        self.get_json("/api/chapters", &[("manga", manga)]).await
    }

    pub async fn pages(&self, manga: &str, chapter: &str) -> Result<Vec<String>, ClientError> {
        self.get_json("/api/pages", &[("manga", manga), ("chapter", chapter)])
            .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http.get(&url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.error)
                .unwrap_or(text);
            return Err(ClientError::Status { status, message });
        }

        Ok(response.json().await?)
    }
}
