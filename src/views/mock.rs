//! In-memory [`ContactApi`] for view and page tests

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::client::{ClientError, ContactApi};
use crate::store::{ContactFormDraft, ContactMessage};

pub(crate) fn message(id: &str, is_read: bool) -> ContactMessage {
    ContactMessage {
        id: id.to_string(),
        name: format!("Sender {}", id),
        email: format!("sender{}@example.com", id),
        subject: format!("Subject {}", id),
        message: format!("Body {}", id),
        timestamp: Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
        is_read,
    }
}

pub(crate) struct MockApi {
    messages: Mutex<Vec<ContactMessage>>,
    failing: AtomicBool,
    delay: Duration,
    submits: AtomicUsize,
    lists: AtomicUsize,
    mark_reads: AtomicUsize,
}

impl MockApi {
    pub(crate) fn new() -> Self {
        Self::with_messages(Vec::new())
    }

    pub(crate) fn with_messages(messages: Vec<ContactMessage>) -> Self {
        Self {
            messages: Mutex::new(messages),
            failing: AtomicBool::new(false),
            delay: Duration::ZERO,
            submits: AtomicUsize::new(0),
            lists: AtomicUsize::new(0),
            mark_reads: AtomicUsize::new(0),
        }
    }

    pub(crate) fn failing() -> Self {
        let api = Self::new();
        api.set_failing(true);
        api
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub(crate) fn submit_calls(&self) -> usize {
        self.submits.load(Ordering::SeqCst)
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.lists.load(Ordering::SeqCst)
    }

    pub(crate) fn mark_read_calls(&self) -> usize {
        self.mark_reads.load(Ordering::SeqCst)
    }

    async fn respond(&self) -> Result<(), ClientError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            Err(ClientError::Unavailable)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ContactApi for MockApi {
    async fn submit(&self, draft: &ContactFormDraft) -> Result<ContactMessage, ClientError> {
        let n = self.submits.fetch_add(1, Ordering::SeqCst) + 1;
        self.respond().await?;

        let created = ContactMessage {
            id: format!("m{}", n),
            name: draft.name.clone(),
            email: draft.email.clone(),
            subject: draft.subject.clone(),
            message: draft.message.clone(),
            timestamp: Utc::now(),
            is_read: false,
        };
        if let Ok(mut messages) = self.messages.lock() {
            messages.insert(0, created.clone());
        }
        Ok(created)
    }

    async fn list(&self) -> Result<Vec<ContactMessage>, ClientError> {
        self.lists.fetch_add(1, Ordering::SeqCst);
        self.respond().await?;
        Ok(self.messages.lock().map(|m| m.clone()).unwrap_or_default())
    }

    async fn mark_read(&self, id: &str) -> Result<(), ClientError> {
        self.mark_reads.fetch_add(1, Ordering::SeqCst);
        self.respond().await?;

        let mut messages = self.messages.lock().unwrap();
        match messages.iter_mut().find(|m| m.id == id) {
            Some(m) => {
                m.is_read = true;
                Ok(())
            }
            None => Err(ClientError::NotFound(id.to_string())),
        }
    }
}
