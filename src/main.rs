//! Portfolio Server
//!
//! Run with: cargo run --bin portfolio
//!
//! Configuration is read from the first config file found (see
//! [`Config::discover`]) with `PORTFOLIO_*` environment overrides, or
//! from the file given as the only argument.

use anyhow::Context;
use portfolio::api::{serve, AppState};
use portfolio::client::{ContactApi, HttpContactApi};
use portfolio::config::Config;
use portfolio::store::MessageStore;
use portfolio::{content, logging};
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, report) = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => Config::load_reported(&path)?,
        None => Config::discover(),
    };

    // The subscriber depends on the config, so config problems are logged after it
    logging::init(&config.logging);
    report.log();

    tracing::info!("Starting portfolio server v{}", env!("CARGO_PKG_VERSION"));

    let site = content::init(config.content_path()).context("loading site content")?;
    tracing::info!(
        projects = site.projects.len(),
        "Content ready for {}",
        site.profile.name
    );

    // Initialize message store
    let store_config = config.store_config();
    tracing::info!("Database: {:?}", store_config.database_path);
    let store = Arc::new(MessageStore::open(&store_config).context("opening message store")?);

    let api_config = config.api_config();

    // Pages use the local store unless a remote backend is configured
    let state = match config.client_config() {
        Some(client_config) => {
            tracing::info!("Pages use remote backend at {}", client_config.base_url);
            let backend: Arc<dyn ContactApi> = Arc::new(HttpContactApi::new(client_config)?);
            AppState::with_backend(store, backend, api_config.clone())
        }
        None => AppState::new(store, api_config.clone()),
    };

    serve(state, &api_config).await?;

    Ok(())
}
