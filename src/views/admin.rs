//! Admin Message Viewer
//!
//! Holds a local copy of the inbox. The list is fetched once; marking a
//! message read flips the local flag after the backend confirms, without
//! re-reading the list. A failed mark-read only gets logged, so the copy can
//! drift from the backend until the next load.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

use crate::client::ContactApi;
use crate::store::ContactMessage;

/// Shown when the initial fetch fails, whatever the cause
pub const FETCH_FAILED: &str = "Failed to fetch messages";

/// Snapshot of the viewer for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminState {
    /// True until the initial fetch settles
    pub loading: bool,
    /// Messages in the order the backend returned them
    pub messages: Vec<ContactMessage>,
    pub error: Option<String>,
}

impl Default for AdminState {
    fn default() -> Self {
        Self {
            loading: true,
            messages: Vec::new(),
            error: None,
        }
    }
}

impl AdminState {
    pub fn unread_count(&self) -> usize {
        self.messages.iter().filter(|m| !m.is_read).count()
    }
}

/// What a call to [`AdminViewer::mark_read`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkReadOutcome {
    Marked,
    Failed,
    /// A request for this id is already in flight
    Ignored,
}

/// One admin view instance
pub struct AdminViewer {
    api: Arc<dyn ContactApi>,
    state: RwLock<AdminState>,
    loaded: AtomicBool,
    pending: Mutex<HashSet<String>>,
}

/// Removes an id from the in-flight set when the request settles
struct PendingGuard<'a> {
    pending: &'a Mutex<HashSet<String>>,
    id: String,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut pending) = self.pending.lock() {
            pending.remove(&self.id);
        }
    }
}

impl AdminViewer {
    /// A viewer in the loading state
    pub fn new(api: Arc<dyn ContactApi>) -> Self {
        Self {
            api,
            state: RwLock::new(AdminState::default()),
            loaded: AtomicBool::new(false),
            pending: Mutex::new(HashSet::new()),
        }
    }

    /// Create a viewer and run its initial fetch
    pub async fn mount(api: Arc<dyn ContactApi>) -> Self {
        let viewer = Self::new(api);
        viewer.load().await;
        viewer
    }

    /// Issue the one list fetch. Later calls do nothing and return `false`.
    pub async fn load(&self) -> bool {
        if self.loaded.swap(true, Ordering::SeqCst) {
            return false;
        }

        let result = self.api.list().await;

        let mut state = self.state.write().await;
        match result {
            Ok(messages) => {
                tracing::debug!(count = messages.len(), "Fetched contact messages");
                state.messages = messages;
                state.error = None;
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching messages");
                state.messages.clear();
                state.error = Some(FETCH_FAILED.to_string());
            }
        }
        state.loading = false;
        true
    }

    /// Mark one message read on the backend, then locally
    pub async fn mark_read(&self, id: &str) -> MarkReadOutcome {
        let _guard = {
            let Ok(mut pending) = self.pending.lock() else {
                return MarkReadOutcome::Ignored;
            };
            if !pending.insert(id.to_string()) {
                return MarkReadOutcome::Ignored;
            }
            PendingGuard {
                pending: &self.pending,
                id: id.to_string(),
            }
        };

        match self.api.mark_read(id).await {
            Ok(()) => {
                let mut state = self.state.write().await;
                for message in state.messages.iter_mut().filter(|m| m.id == id) {
                    message.is_read = true;
                }
                tracing::info!(message_id = %id, "Message marked as read");
                MarkReadOutcome::Marked
            }
            Err(e) => {
                tracing::error!(message_id = %id, error = %e, "Error marking message as read");
                MarkReadOutcome::Failed
            }
        }
    }

    pub async fn snapshot(&self) -> AdminState {
        self.state.read().await.clone()
    }

    pub async fn unread_count(&self) -> usize {
        self.state.read().await.unread_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::mock::{message, MockApi};
    use std::time::Duration;

    fn viewer(api: &Arc<MockApi>) -> AdminViewer {
        let api: Arc<dyn ContactApi> = api.clone();
        AdminViewer::new(api)
    }

    #[tokio::test]
    async fn test_starts_loading() {
        let api = Arc::new(MockApi::new());
        let viewer = viewer(&api);

        let state = viewer.snapshot().await;
        assert!(state.loading);
        assert!(state.messages.is_empty());
        assert_eq!(api.list_calls(), 0);
    }

    #[tokio::test]
    async fn test_load_keeps_backend_order() {
        let api = Arc::new(MockApi::with_messages(vec![
            message("2", false),
            message("1", true),
            message("3", false),
        ]));
        let viewer = viewer(&api);

        assert!(viewer.load().await);
        let state = viewer.snapshot().await;
        assert!(!state.loading);
        assert_eq!(state.error, None);
        let ids: Vec<&str> = state.messages.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1", "3"]);
        assert_eq!(state.unread_count(), 2);
    }

    #[tokio::test]
    async fn test_load_runs_once() {
        let api = Arc::new(MockApi::new());
        let viewer = viewer(&api);

        assert!(viewer.load().await);
        assert!(!viewer.load().await);
        assert_eq!(api.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_load_failure() {
        let api = Arc::new(MockApi::with_messages(vec![message("1", false)]));
        api.set_failing(true);
        let viewer = AdminViewer::mount(api.clone()).await;

        let state = viewer.snapshot().await;
        assert!(!state.loading);
        assert!(state.messages.is_empty());
        assert_eq!(state.error.as_deref(), Some(FETCH_FAILED));
    }

    #[tokio::test]
    async fn test_mark_read_updates_only_that_message() {
        let api = Arc::new(MockApi::with_messages(vec![
            message("1", false),
            message("2", true),
        ]));
        let viewer = viewer(&api);
        viewer.load().await;
        let before = viewer.snapshot().await;

        assert_eq!(viewer.mark_read("1").await, MarkReadOutcome::Marked);

        let after = viewer.snapshot().await;
        let mut expected = before.messages.clone();
        expected[0].is_read = true;
        assert_eq!(after.messages, expected);
        assert!(after.messages.iter().all(|m| m.is_read));
        assert_eq!(api.list_calls(), 1);
        assert_eq!(api.mark_read_calls(), 1);
    }

    #[tokio::test]
    async fn test_mark_read_failure_leaves_state() {
        let api = Arc::new(MockApi::with_messages(vec![message("1", false)]));
        let viewer = viewer(&api);
        viewer.load().await;

        api.set_failing(true);
        assert_eq!(viewer.mark_read("1").await, MarkReadOutcome::Failed);

        let state = viewer.snapshot().await;
        assert!(!state.messages[0].is_read);
        assert_eq!(state.error, None);
        assert_eq!(viewer.unread_count().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mark_read_in_flight_ignored() {
        let api = Arc::new(
            MockApi::with_messages(vec![message("1", false)])
                .with_delay(Duration::from_millis(100)),
        );
        let viewer = viewer(&api);
        viewer.load().await;

        let (first, second) = tokio::join!(viewer.mark_read("1"), viewer.mark_read("1"));
        assert_eq!(first, MarkReadOutcome::Marked);
        assert_eq!(second, MarkReadOutcome::Ignored);
        assert_eq!(api.mark_read_calls(), 1);

        // Settled requests release the id
        assert_eq!(viewer.mark_read("1").await, MarkReadOutcome::Marked);
    }
}
