//! Contact Form
//!
//! State machine behind the "Send Message" form:
//!
//! ```text
//! Idle(draft) ──submit──▶ Submitting ──ok──▶ Submitted ──reset delay──▶ Idle(empty)
//!                              │
//!                              └──err──▶ Idle(draft unchanged, error shown)
//! ```
//!
//! Only an `Idle` form submits, so one instance never has two requests in
//! flight. The reset task lives as long as the form does.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::client::ContactApi;
use crate::store::{ContactFormDraft, ContactMessage, DraftError, DraftField};

/// How long the "Message Sent!" panel stays up
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_secs(5);

/// Shown for any failed submission, whatever the cause
pub const SUBMIT_FAILED: &str = "Failed to send message. Please try again or contact me directly.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Submitted,
}

/// Everything a renderer needs to draw the form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub draft: ContactFormDraft,
    pub status: FormStatus,
    pub error: Option<String>,
}

impl FormState {
    /// Inputs and the submit button are disabled while this is true
    pub fn is_busy(&self) -> bool {
        self.status == FormStatus::Submitting
    }
}

/// What a call to [`ContactForm::submit`] did
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The backend accepted the message
    Sent(ContactMessage),
    /// The draft failed the required-field gate; nothing was sent
    Rejected(DraftError),
    /// The request failed; the draft is kept for a retry
    Failed,
    /// A submission is in flight or the sent panel is showing
    Ignored,
}

/// One contact form instance
pub struct ContactForm {
    api: Arc<dyn ContactApi>,
    state: Arc<watch::Sender<FormState>>,
    reset_delay: Duration,
    reset_task: Mutex<Option<JoinHandle<()>>>,
}

impl ContactForm {
    /// A fresh form with an empty draft
    pub fn new(api: Arc<dyn ContactApi>) -> Self {
        let (tx, _rx) = watch::channel(FormState::default());
        Self {
            api,
            state: Arc::new(tx),
            reset_delay: DEFAULT_RESET_DELAY,
            reset_task: Mutex::new(None),
        }
    }

    pub fn with_reset_delay(mut self, delay: Duration) -> Self {
        self.reset_delay = delay;
        self
    }

    pub fn state(&self) -> FormState {
        self.state.borrow().clone()
    }

    pub fn status(&self) -> FormStatus {
        self.state.borrow().status
    }

    pub fn draft(&self) -> ContactFormDraft {
        self.state.borrow().draft.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// Observe state changes, including the delayed reset
    pub fn subscribe(&self) -> watch::Receiver<FormState> {
        self.state.subscribe()
    }

    /// Edit one field. Clears the current error; ignored while submitting.
    pub fn set_field(&self, field: DraftField, value: impl Into<String>) -> bool {
        let value = value.into();
        self.state.send_if_modified(|s| {
            if s.is_busy() {
                return false;
            }
            s.draft.set(field, value);
            s.error = None;
            true
        })
    }

    /// Replace the whole draft, as if every field had been typed
    pub fn fill(&self, draft: ContactFormDraft) -> bool {
        self.state.send_if_modified(|s| {
            if s.is_busy() {
                return false;
            }
            s.draft = draft;
            s.error = None;
            true
        })
    }

    /// Send the current draft
    pub async fn submit(&self) -> SubmitOutcome {
        let mut rejected = None;
        let mut outgoing = None;

        // Gate and in-flight flip happen under one write lock
        self.state.send_if_modified(|s| {
            if s.status != FormStatus::Idle {
                return false;
            }
            if let Err(e) = s.draft.validate() {
                s.error = Some(e.to_string());
                rejected = Some(e);
                return true;
            }
            s.status = FormStatus::Submitting;
            s.error = None;
            outgoing = Some(s.draft.clone());
            true
        });

        if let Some(e) = rejected {
            tracing::debug!(reason = %e, "Contact form draft rejected");
            return SubmitOutcome::Rejected(e);
        }
        let Some(draft) = outgoing else {
            tracing::debug!("Contact form busy, submit ignored");
            return SubmitOutcome::Ignored;
        };

        let mut in_flight = InFlight {
            state: &self.state,
            settled: false,
        };
        let result = self.api.submit(&draft).await;
        in_flight.settled = true;

        match result {
            Ok(message) => {
                self.state.send_modify(|s| {
                    s.draft = ContactFormDraft::default();
                    s.status = FormStatus::Submitted;
                    s.error = None;
                });
                self.schedule_reset();
                tracing::info!(message_id = %message.id, "Contact message sent");
                SubmitOutcome::Sent(message)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error submitting contact form");
                self.state.send_modify(|s| {
                    s.status = FormStatus::Idle;
                    s.error = Some(SUBMIT_FAILED.to_string());
                });
                SubmitOutcome::Failed
            }
        }
    }

    fn schedule_reset(&self) {
        let state = Arc::clone(&self.state);
        let delay = self.reset_delay;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            state.send_if_modified(|s| {
                if s.status != FormStatus::Submitted {
                    return false;
                }
                s.status = FormStatus::Idle;
                true
            });
        });

        match self.reset_task.lock() {
            Ok(mut slot) => {
                if let Some(previous) = slot.replace(handle) {
                    previous.abort();
                }
            }
            Err(_) => handle.abort(),
        }
    }
}

/// Returns a form to `Idle`, draft kept, when a submit is dropped mid-request
struct InFlight<'a> {
    state: &'a watch::Sender<FormState>,
    settled: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        tracing::debug!("Contact form submit cancelled");
        self.state.send_if_modified(|s| {
            if s.status != FormStatus::Submitting {
                return false;
            }
            s.status = FormStatus::Idle;
            true
        });
    }
}

impl Drop for ContactForm {
    fn drop(&mut self) {
        if let Ok(mut slot) = self.reset_task.lock() {
            if let Some(handle) = slot.take() {
                handle.abort();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::mock::MockApi;

    fn valid_draft() -> ContactFormDraft {
        ContactFormDraft::new("A", "a@x.com", "S", "M")
    }

    fn form(api: &Arc<MockApi>) -> ContactForm {
        let api: Arc<dyn ContactApi> = api.clone();
        ContactForm::new(api)
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_success_then_reset() {
        let api = Arc::new(MockApi::new());
        let form = form(&api);
        form.fill(valid_draft());

        let outcome = form.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Sent(_)));
        assert_eq!(form.status(), FormStatus::Submitted);
        assert!(form.draft().is_empty());
        assert_eq!(form.error(), None);
        assert_eq!(api.submit_calls(), 1);

        tokio::time::sleep(Duration::from_millis(4_999)).await;
        assert_eq!(form.status(), FormStatus::Submitted);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(form.status(), FormStatus::Idle);
        assert!(form.draft().is_empty());
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_draft() {
        let api = Arc::new(MockApi::failing());
        let form = form(&api);
        form.fill(valid_draft());

        let outcome = form.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Failed));
        assert_eq!(form.status(), FormStatus::Idle);
        assert_eq!(form.draft(), valid_draft());
        assert_eq!(form.error().as_deref(), Some(SUBMIT_FAILED));
        assert_eq!(api.submit_calls(), 1);
    }

    #[tokio::test]
    async fn test_editing_clears_error_and_retry_works() {
        let api = Arc::new(MockApi::failing());
        let form = form(&api);
        form.fill(valid_draft());
        form.submit().await;
        assert!(form.error().is_some());

        assert!(form.set_field(DraftField::Subject, "S2"));
        assert_eq!(form.error(), None);
        assert_eq!(form.draft().subject, "S2");

        api.set_failing(false);
        assert!(matches!(form.submit().await, SubmitOutcome::Sent(_)));
        assert_eq!(api.submit_calls(), 2);
    }

    #[tokio::test]
    async fn test_empty_name_never_sends() {
        let api = Arc::new(MockApi::new());
        let form = form(&api);
        form.fill(ContactFormDraft::new("", "a@x.com", "S", "M"));

        let outcome = form.submit().await;
        assert!(matches!(
            outcome,
            SubmitOutcome::Rejected(DraftError::Missing(DraftField::Name))
        ));
        assert_eq!(api.submit_calls(), 0);
        assert_eq!(form.status(), FormStatus::Idle);
        assert!(form.error().is_some());
        assert_eq!(form.draft().email, "a@x.com");
    }

    #[tokio::test]
    async fn test_invalid_email_never_sends() {
        let api = Arc::new(MockApi::new());
        let form = form(&api);
        form.fill(ContactFormDraft::new("A", "invalid-email", "S", "M"));

        assert!(matches!(
            form.submit().await,
            SubmitOutcome::Rejected(DraftError::InvalidEmail)
        ));
        assert_eq!(api.submit_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_submit_sends_once() {
        let api = Arc::new(MockApi::new().with_delay(Duration::from_millis(200)));
        let form = form(&api);
        form.fill(valid_draft());

        let (first, second) = tokio::join!(form.submit(), form.submit());

        let sent = [&first, &second]
            .iter()
            .filter(|o| matches!(o, SubmitOutcome::Sent(_)))
            .count();
        let ignored = [&first, &second]
            .iter()
            .filter(|o| matches!(o, SubmitOutcome::Ignored))
            .count();
        assert_eq!((sent, ignored), (1, 1));
        assert_eq!(api.submit_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_inputs_locked_while_submitting() {
        let api = Arc::new(MockApi::new().with_delay(Duration::from_millis(200)));
        let form = form(&api);
        form.fill(valid_draft());

        let edit = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            assert!(form.state().is_busy());
            form.set_field(DraftField::Name, "B")
        };
        let (outcome, edited) = tokio::join!(form.submit(), edit);

        assert!(matches!(outcome, SubmitOutcome::Sent(_)));
        assert!(!edited);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_ignored_while_sent_panel_shows() {
        let api = Arc::new(MockApi::new());
        let form = form(&api);
        form.fill(valid_draft());
        form.submit().await;

        form.fill(valid_draft());
        assert!(matches!(form.submit().await, SubmitOutcome::Ignored));
        assert_eq!(api.submit_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_reset() {
        let api = Arc::new(MockApi::new());
        let form = form(&api);
        let rx = form.subscribe();
        form.fill(valid_draft());
        form.submit().await;

        drop(form);
        tokio::time::sleep(Duration::from_secs(6)).await;

        assert_eq!(rx.borrow().status, FormStatus::Submitted);
        assert!(rx.has_changed().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_reset_delay() {
        let api = Arc::new(MockApi::new());
        let form = form(&api).with_reset_delay(Duration::from_secs(1));
        form.fill(valid_draft());
        form.submit().await;

        tokio::time::sleep(Duration::from_millis(1_001)).await;
        assert_eq!(form.status(), FormStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_submit_returns_to_idle() {
        let api = Arc::new(MockApi::new().with_delay(Duration::from_millis(500)));
        let form = form(&api);
        form.fill(valid_draft());

        let cancelled = tokio::time::timeout(Duration::from_millis(100), form.submit()).await;
        assert!(cancelled.is_err());

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(form.status(), FormStatus::Idle);
        assert_eq!(form.draft(), valid_draft());
        assert!(form.set_field(DraftField::Subject, "Again"));

        let outcome = form.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Sent(_)));
        assert_eq!(api.submit_calls(), 2);
    }
}
