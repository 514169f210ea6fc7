//! Contact Routes
//!
//! - POST /api/contact - Store a contact form submission
//! - GET /api/contact - List stored messages, newest first
//! - PATCH /api/contact/:id/read - Mark a message as read

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::MessageResponse;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::store::{ContactFormDraft, ContactMessage};

/// POST /api/contact
///
/// Validates the submission and stores it unread. Empty fields and
/// implausible email addresses are rejected with 400.
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<ContactFormDraft>,
) -> ApiResult<Json<ContactMessage>> {
    draft.validate()?;

    let message = state.store.insert(draft).await?;
    tracing::info!(id = %message.id, email = %message.email, "Contact message stored");

    Ok(Json(message))
}

/// GET /api/contact
pub async fn list_contacts(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ContactMessage>>> {
    let messages = state.store.list().await?;
    Ok(Json(messages))
}

/// PATCH /api/contact/:id/read
pub async fn mark_read(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    if !state.store.mark_read(&id).await? {
        return Err(ApiError::NotFound(format!("Message {} not found", id)));
    }

    tracing::debug!(id = %id, "Message marked as read");
    Ok(Json(MessageResponse::new("Message marked as read")))
}
