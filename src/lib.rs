//! # Portfolio
//!
//! Personal portfolio site: static content sections, a contact form backed
//! by a small JSON API, and an admin inbox for the submitted messages.
//!
//! ## Modules
//!
//! - [`content`]: Site content, loaded once
//! - [`store`]: SQLite-backed contact message store
//! - [`api`]: HTTP server with Axum (JSON API and pages)
//! - [`client`]: Backend clients behind the [`ContactApi`] trait
//! - [`views`]: Contact form and admin viewer state machines
//! - [`web`]: Server-rendered pages and the route table
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use portfolio::{serve, ApiConfig, AppState, MessageStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(MessageStore::open_in_memory()?);
//!     let config = ApiConfig::new("127.0.0.1", 8001);
//!
//!     serve(AppState::new(store, config.clone()), &config).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod content;
pub mod logging;
pub mod store;
pub mod views;
pub mod web;

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use client::{ClientConfig, ClientError, ContactApi, HttpContactApi, StoreBackend};

pub use config::{Config, ConfigError, LoggingConfig};

pub use content::{ContentError, Portfolio};

pub use store::{
    ContactFormDraft, ContactMessage, DraftError, DraftField, MessageStore, StoreConfig,
    StoreError, StoreResult,
};

pub use views::{AdminState, AdminViewer, ContactForm, FormState, FormStatus};
