//! Application State
//!
//! Shared state accessible by all API and page handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::client::{ContactApi, StoreBackend};
use crate::content::{self, Portfolio};
use crate::store::MessageStore;
use crate::views::DEFAULT_RESET_DELAY;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Message store behind the `/api/contact` endpoints
    pub store: Arc<MessageStore>,
    /// Backend the rendered pages talk to (the local store unless configured otherwise)
    pub backend: Arc<dyn ContactApi>,
    /// Static site content
    pub content: &'static Portfolio,
    /// Server configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// State whose pages use the in-process store
    pub fn new(store: Arc<MessageStore>, config: ApiConfig) -> Self {
        let backend: Arc<dyn ContactApi> = Arc::new(StoreBackend::new(Arc::clone(&store)));
        Self::with_backend(store, backend, config)
    }

    /// State whose pages use a separate backend (e.g. a remote API)
    pub fn with_backend(
        store: Arc<MessageStore>,
        backend: Arc<dyn ContactApi>,
        config: ApiConfig,
    ) -> Self {
        Self {
            store,
            backend,
            content: content::get(),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Allowed CORS origins; empty or `*` allows any
    pub cors_origins: Vec<String>,
    /// Maximum request body size in bytes
    pub max_body_size: usize,
    /// How long the "Message Sent!" panel stays up
    pub contact_reset_delay: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8001,
            cors_origins: Vec::new(),
            max_body_size: 64 * 1024,
            contact_reset_delay: DEFAULT_RESET_DELAY,
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
