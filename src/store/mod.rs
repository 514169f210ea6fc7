//! Contact Message Store
//!
//! Durable home of every message submitted through the contact form.
//!
//! # Usage
//! ```ignore
//! let store = MessageStore::open(&StoreConfig::new("data/messages.sqlite3"))?;
//! let msg = store.insert(ContactFormDraft::new("A", "a@x.com", "S", "M")).await?;
//! store.mark_read(&msg.id).await?;
//! ```

mod error;
mod messages;
mod types;

pub use error::{StoreError, StoreResult};
pub use messages::{MessageStore, StoreConfig};
pub use types::{is_plausible_email, ContactFormDraft, ContactMessage, DraftError, DraftField};
