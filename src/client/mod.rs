//! Backend Client
//!
//! The seam between the contact form / admin viewer and whatever stores
//! messages. [`HttpContactApi`] talks to a portfolio backend over HTTP;
//! [`StoreBackend`] calls a [`MessageStore`](crate::store::MessageStore) in
//! the same process.

mod http;
mod local;

pub use http::{backend_url, ClientConfig, HttpContactApi, DEFAULT_BACKEND_URL};
pub use local::StoreBackend;

use async_trait::async_trait;
use thiserror::Error;

use crate::store::{ContactFormDraft, ContactMessage, DraftError, StoreError};

/// Operations the contact form and admin viewer need from the backend
#[async_trait]
pub trait ContactApi: Send + Sync {
    /// Create a message from a draft (`POST /contact`)
    async fn submit(&self, draft: &ContactFormDraft) -> Result<ContactMessage, ClientError>;

    /// All messages in backend order (`GET /contact`)
    async fn list(&self) -> Result<Vec<ContactMessage>, ClientError>;

    /// Flag one message as read (`PATCH /contact/{id}/read`)
    async fn mark_read(&self, id: &str) -> Result<(), ClientError>;
}

/// Errors talking to the backend
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request timeout")]
    Timeout,

    #[error("Backend unavailable")]
    Unavailable,

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Backend error ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rejected: {0}")]
    Rejected(#[from] DraftError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl ClientError {
    pub(crate) fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout
        } else if e.is_connect() {
            ClientError::Unavailable
        } else {
            ClientError::Request(e)
        }
    }
}
