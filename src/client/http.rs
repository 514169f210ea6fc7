//! HTTP backend client
//!
//! reqwest client for the portfolio backend's contact endpoints.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

use super::{ClientError, ContactApi};
use crate::store::{ContactFormDraft, ContactMessage};

/// Backend used when nothing else is configured
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8001";

/// `PORTFOLIO_BACKEND_URL`, read once per process
static BACKEND_URL: Lazy<Option<String>> = Lazy::new(|| {
    std::env::var("PORTFOLIO_BACKEND_URL")
        .ok()
        .map(|url| normalize_base(&url))
        .filter(|url| !url.is_empty())
});

/// The backend base URL from the environment, if one was set
pub fn backend_url() -> Option<&'static str> {
    BACKEND_URL.as_deref()
}

fn normalize_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Configuration for [`HttpContactApi`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend origin, without the `/api` prefix (e.g. "http://localhost:8001")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: backend_url().unwrap_or(DEFAULT_BACKEND_URL).to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            base_url: normalize_base(base_url.as_ref()),
            ..Default::default()
        }
    }
}

/// Portfolio backend REST client
pub struct HttpContactApi {
    client: Client,
    config: ClientConfig,
}

impl HttpContactApi {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.config.base_url, path)
    }

    async fn check(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        if status == StatusCode::NOT_FOUND {
            Err(ClientError::NotFound(message))
        } else {
            Err(ClientError::Status {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl ContactApi for HttpContactApi {
    async fn submit(&self, draft: &ContactFormDraft) -> Result<ContactMessage, ClientError> {
        let response = self
            .client
            .post(self.url("/contact"))
            .json(draft)
            .send()
            .await
            .map_err(ClientError::from_reqwest)?;

        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    async fn list(&self) -> Result<Vec<ContactMessage>, ClientError> {
        let response = self
            .client
            .get(self.url("/contact"))
            .send()
            .await
            .map_err(ClientError::from_reqwest)?;

        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    async fn mark_read(&self, id: &str) -> Result<(), ClientError> {
        let path = format!("/contact/{}/read", urlencoding::encode(id));
        let response = self
            .client
            .patch(self.url(&path))
            .send()
            .await
            .map_err(ClientError::from_reqwest)?;

        Self::check(response).await?;
        Ok(())
    }
}
