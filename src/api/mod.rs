//! Portfolio HTTP server
//!
//! JSON API plus the server-rendered site, built with Axum.
//!
//! # Endpoints
//!
//! ## Contact
//! - `POST /api/contact` - Store a contact form submission
//! - `GET /api/contact` - List messages, newest first
//! - `PATCH /api/contact/:id/read` - Mark a message as read
//!
//! ## Portfolio
//! - `GET /api/` - API banner
//! - `GET /api/portfolio/projects`
//! - `GET /api/portfolio/skills`
//! - `GET /api/portfolio/education`
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! ## Pages
//! See [`crate::web`]. Unknown `/api` paths answer with a JSON 404, any
//! other unknown path with the HTML 404 page.
//!
//! # Example
//!
//! ```rust,ignore
//! use portfolio::api::{serve, ApiConfig, AppState};
//! use portfolio::store::MessageStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(MessageStore::open_path("messages.db".as_ref())?);
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(store, config.clone());
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Uri},
    response::{IntoResponse, Response},
    routing::{get, patch},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::web;

/// Build the router with all API routes, pages and middleware
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);
    let body_limit = state.config.max_body_size;

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        // Portfolio routes
        .route("/api", get(routes::portfolio::root))
        .route("/api/", get(routes::portfolio::root))
        .route("/api/portfolio/projects", get(routes::portfolio::projects))
        .route("/api/portfolio/skills", get(routes::portfolio::skills))
        .route("/api/portfolio/education", get(routes::portfolio::education))
        // Contact routes
        .route(
            "/api/contact",
            get(routes::contact::list_contacts).post(routes::contact::submit_contact),
        )
        .route("/api/contact/:id/read", patch(routes::contact::mark_read))
        // Health routes
        .route("/health", get(routes::health::full_health))
        .route("/health/live", get(routes::health::liveness))
        .route("/health/ready", get(routes::health::readiness))
        // Pages
        .merge(web::routes())
        .fallback(fallback)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// Permissive CORS unless specific origins are configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn fallback(uri: Uri) -> Response {
    let path = uri.path();
    if path == "/api" || path.starts_with("/api/") {
        ApiError::NotFound(format!("No endpoint at {}", path)).into_response()
    } else {
        web::not_found(uri).await.into_response()
    }
}

/// Start the server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Portfolio server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Portfolio server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
