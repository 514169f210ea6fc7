//! Data Transfer Objects
//!
//! Response bodies for the API endpoints. Contact requests deserialize
//! straight into [`ContactFormDraft`](crate::store::ContactFormDraft) and
//! responses reuse [`ContactMessage`](crate::store::ContactMessage).

use serde::{Deserialize, Serialize};

use crate::content::{Certification, EducationEntry, Project, SkillCategory};

// ============================================
// GENERIC DTOs
// ============================================

/// `{"message": "..."}` acknowledgement
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================
// PORTFOLIO DTOs
// ============================================

#[derive(Debug, Serialize)]
pub struct ProjectsResponse<'a> {
    pub projects: &'a [Project],
}

#[derive(Debug, Serialize)]
pub struct SkillsResponse<'a> {
    pub categories: &'a [SkillCategory],
    pub certifications: &'a [Certification],
}

#[derive(Debug, Serialize)]
pub struct EducationResponse<'a> {
    pub education: &'a [EducationEntry],
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: healthy or unhealthy
    pub status: String,
    /// Message store status
    pub storage: String,
    /// Stored messages, when the store answered
    pub messages: Option<u64>,
    /// Unread messages, when the store answered
    pub unread: Option<u64>,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
