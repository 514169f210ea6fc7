//! View Models
//!
//! Client-side state for the two interactive parts of the site. Both talk
//! to the backend only through [`ContactApi`](crate::client::ContactApi) and
//! share no state with each other.

pub mod admin;
pub mod contact_form;

#[cfg(test)]
pub(crate) mod mock;

pub use admin::{AdminState, AdminViewer, MarkReadOutcome, FETCH_FAILED};
pub use contact_form::{
    ContactForm, FormState, FormStatus, SubmitOutcome, DEFAULT_RESET_DELAY, SUBMIT_FAILED,
};
