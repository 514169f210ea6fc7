//! In-process backend
//!
//! Lets the web shell run against its own store without an HTTP hop.
//! Applies the same checks as the `/api/contact` endpoints.

use async_trait::async_trait;
use std::sync::Arc;

use super::{ClientError, ContactApi};
use crate::store::{ContactFormDraft, ContactMessage, MessageStore};

/// [`ContactApi`] over a [`MessageStore`]
#[derive(Clone)]
pub struct StoreBackend {
    store: Arc<MessageStore>,
}

impl StoreBackend {
    pub fn new(store: Arc<MessageStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ContactApi for StoreBackend {
    async fn submit(&self, draft: &ContactFormDraft) -> Result<ContactMessage, ClientError> {
        draft.validate()?;
        Ok(self.store.insert(draft.clone()).await?)
    }

    async fn list(&self) -> Result<Vec<ContactMessage>, ClientError> {
        Ok(self.store.list().await?)
    }

    async fn mark_read(&self, id: &str) -> Result<(), ClientError> {
        if self.store.mark_read(id).await? {
            Ok(())
        } else {
            Err(ClientError::NotFound(format!("Message {} not found", id)))
        }
    }
}
