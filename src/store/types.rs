//! Contact message types
//!
//! Shared by the store, the API, the HTTP client and the view models.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A message left through the contact form.
///
/// Created by the backend when a submission succeeds; `is_read` only ever
/// moves from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    /// Opaque unique identifier assigned by the backend
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    /// When the backend accepted the message
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub is_read: bool,
}

/// The four contact form fields, before submission
///
/// Absent fields deserialize as empty so they fail validation like blank ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactFormDraft {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// One of the contact form inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Name,
    Email,
    Subject,
    Message,
}

impl DraftField {
    pub const ALL: [DraftField; 4] = [
        DraftField::Name,
        DraftField::Email,
        DraftField::Subject,
        DraftField::Message,
    ];

    /// Form input name
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftField::Name => "name",
            DraftField::Email => "email",
            DraftField::Subject => "subject",
            DraftField::Message => "message",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            DraftField::Name => "your name",
            DraftField::Email => "your email address",
            DraftField::Subject => "a subject",
            DraftField::Message => "a message",
        }
    }
}

impl std::str::FromStr for DraftField {
    type Err = DraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DraftField::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| DraftError::UnknownField(s.to_string()))
    }
}

/// Reasons a draft cannot be submitted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Please enter {}.", .0.label())]
    Missing(DraftField),

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("Unknown form field: {0}")]
    UnknownField(String),
}

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s.]+$").expect("email pattern compiles")
});

/// Loose syntactic check, in the spirit of an `<input type="email">`
pub fn is_plausible_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

impl ContactFormDraft {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Name => &self.name,
            DraftField::Email => &self.email,
            DraftField::Subject => &self.subject,
            DraftField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::Name => self.name = value,
            DraftField::Email => self.email = value,
            DraftField::Subject => self.subject = value,
            DraftField::Message => self.message = value,
        }
    }

    /// True when every field is empty
    pub fn is_empty(&self) -> bool {
        DraftField::ALL.iter().all(|f| self.field(*f).is_empty())
    }

    /// Required-field and email checks, reporting the first failure in form order
    pub fn validate(&self) -> Result<(), DraftError> {
        for field in DraftField::ALL {
            if self.field(field).trim().is_empty() {
                return Err(DraftError::Missing(field));
            }
        }
        if !is_plausible_email(&self.email) {
            return Err(DraftError::InvalidEmail);
        }
        Ok(())
    }
}
