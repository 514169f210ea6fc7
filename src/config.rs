//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api;
use crate::client::{self, ClientConfig};
use crate::store::StoreConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub contact: ContactConfig,

    #[serde(default)]
    pub content: ContentConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Empty or `["*"]` allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8001
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

/// Message store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_database_path")]
    pub database_path: String,

    #[serde(default = "default_list_limit")]
    pub list_limit: usize,
}

fn default_database_path() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("portfolio").join("messages.db"))
        .unwrap_or_else(|| PathBuf::from("./portfolio_data/messages.db"))
        .to_string_lossy()
        .to_string()
}

fn default_list_limit() -> usize {
    100
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            list_limit: default_list_limit(),
        }
    }
}

/// Where the rendered pages send contact requests
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Remote backend origin; unset means the in-process store
    pub url: Option<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

fn default_request_timeout() -> u64 {
    10_000
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: None,
            request_timeout_ms: default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactConfig {
    /// Seconds the "Message Sent!" panel stays up
    #[serde(default = "default_reset_delay")]
    pub reset_delay_secs: u64,
}

fn default_reset_delay() -> u64 {
    5
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            reset_delay_secs: default_reset_delay(),
        }
    }
}

/// Site content source
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentConfig {
    /// TOML content file; unset uses the built-in content
    pub path: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        LoadReport::default()
            .with_problems(config.apply_env_overrides())
            .log();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let (config, report) = Self::load_reported(path)?;
        report.log();
        Ok(config)
    }

    /// Like [`load_with_env`](Self::load_with_env), but hands back what
    /// happened instead of logging it
    pub fn load_reported(path: &Path) -> Result<(Self, LoadReport), ConfigError> {
        let mut config = Self::load(path)?;
        let report = LoadReport {
            source: Some(path.to_path_buf()),
            problems: config.apply_env_overrides(),
        };
        Ok((config, report))
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let (config, report) = Self::discover();
        report.log();
        config
    }

    /// Search the default locations without logging, so the caller can
    /// report the outcome once a subscriber is installed
    pub fn discover() -> (Self, LoadReport) {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("portfolio").join("config.toml")),
            Some(PathBuf::from("/etc/portfolio/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::discover_in(&config_paths)
    }

    /// First loadable file among `paths`, else defaults; env overrides either way
    pub fn discover_in(paths: &[PathBuf]) -> (Self, LoadReport) {
        let mut problems = Vec::new();

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load_reported(path) {
                Ok((config, report)) => return (config, report.with_problems(problems)),
                Err(e) => problems.push(e),
            }
        }

        // Fall back to environment-only config
        let mut config = Config::default();
        problems.extend(config.apply_env_overrides());
        (
            config,
            LoadReport {
                source: None,
                problems,
            },
        )
    }

    /// Apply environment variable overrides, returning the ones that were ignored
    pub fn apply_env_overrides(&mut self) -> Vec<ConfigError> {
        let mut problems = Vec::new();

        // Server overrides
        if let Ok(host) = std::env::var("PORTFOLIO_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("PORTFOLIO_PORT") {
            match port.parse() {
                Ok(p) => self.server.port = p,
                Err(_) => problems.push(ConfigError::InvalidEnv {
                    var: "PORTFOLIO_PORT",
                    value: port,
                }),
            }
        }

        // Storage overrides
        if let Ok(path) = std::env::var("PORTFOLIO_DB_PATH") {
            self.storage.database_path = path;
        }

        // Backend override, read once per process
        if let Some(url) = client::backend_url() {
            self.backend.url = Some(url.to_string());
        }

        // Content overrides
        if let Ok(path) = std::env::var("PORTFOLIO_CONTENT_PATH") {
            self.content.path = Some(path);
        }

        // Logging overrides
        if let Ok(level) = std::env::var("PORTFOLIO_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("PORTFOLIO_LOG_FORMAT") {
            self.logging.format = format;
        }

        problems
    }

    /// Settings for the HTTP server
    pub fn api_config(&self) -> api::ApiConfig {
        api::ApiConfig {
            host: self.server.host.clone(),
            port: self.server.port,
            cors_origins: self.server.cors_origins.clone(),
            contact_reset_delay: Duration::from_secs(self.contact.reset_delay_secs),
            ..api::ApiConfig::default()
        }
    }

    /// Settings for the message store
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            database_path: Some(expand_home(&self.storage.database_path)),
            list_limit: self.storage.list_limit,
        }
    }

    /// Client settings when a remote backend is configured
    pub fn client_config(&self) -> Option<ClientConfig> {
        self.backend.url.as_ref().map(|url| ClientConfig {
            request_timeout_ms: self.backend.request_timeout_ms,
            ..ClientConfig::new(url)
        })
    }

    pub fn content_path(&self) -> Option<&Path> {
        self.content.path.as_deref().map(Path::new)
    }
}

/// Expand a leading `~` to the home directory
fn expand_home(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(path),
    };
    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
    }
}

/// Where a configuration came from and what was skipped on the way
#[derive(Debug, Default)]
pub struct LoadReport {
    /// File the config was read from; `None` means defaults
    pub source: Option<PathBuf>,
    /// Files that failed to load and overrides that were ignored
    pub problems: Vec<ConfigError>,
}

impl LoadReport {
    fn with_problems(mut self, mut earlier: Vec<ConfigError>) -> Self {
        earlier.append(&mut self.problems);
        self.problems = earlier;
        self
    }

    /// Emit the report through `tracing`
    pub fn log(&self) {
        for problem in &self.problems {
            tracing::warn!("{}", problem);
        }
        match &self.source {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::info!("Using default config with environment overrides"),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Ignoring invalid {var} {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    let database_path = toml::Value::String(default_database_path());

    format!(
        r#"# Portfolio Configuration
#
# Environment variables override these settings:
# - PORTFOLIO_HOST
# - PORTFOLIO_PORT
# - PORTFOLIO_DB_PATH
# - PORTFOLIO_BACKEND_URL
# - PORTFOLIO_CONTENT_PATH
# - PORTFOLIO_LOG_LEVEL
# - PORTFOLIO_LOG_FORMAT

[server]
# Server host
host = "0.0.0.0"

# Server port
port = 8001

# Allowed CORS origins (empty allows any)
cors_origins = []

[storage]
# SQLite database holding contact messages
database_path = {database_path}

# Maximum messages returned by GET /api/contact
list_limit = 100

[backend]
# Send page requests to a remote backend instead of the local store
# url = "http://localhost:8001"

# Request timeout in milliseconds
request_timeout_ms = 10000

[contact]
# Seconds the "Message Sent!" panel stays up
reset_delay_secs = 5

[content]
# Site content file (defaults to the built-in content)
# path = "content/portfolio.toml"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8001);
        assert_eq!(config.storage.list_limit, 100);
        assert_eq!(config.contact.reset_delay_secs, 5);
        assert!(config.backend.url.is_none());
        assert!(config.client_config().is_none());
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8001);
        assert!(config.server.cors_origins.is_empty());
        assert_eq!(config.backend.request_timeout_ms, 10_000);
        assert!(config.content.path.is_none());
    }

    #[test]
    fn test_partial_config() {
        let config: Config = toml::from_str(
            r#"
[server]
port = 9000

[backend]
url = "http://backend.internal:8001/"

[contact]
reset_delay_secs = 2
"#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");

        let api = config.api_config();
        assert_eq!(api.addr(), "0.0.0.0:9000");
        assert_eq!(api.contact_reset_delay, Duration::from_secs(2));

        let client = config.client_config().unwrap();
        assert_eq!(client.base_url, "http://backend.internal:8001");
        assert_eq!(client.request_timeout_ms, 10_000);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[storage]\ndatabase_path = \"/tmp/msgs.db\"\nlist_limit = 5").unwrap();

        let config = Config::load(file.path()).unwrap();
        let store = config.store_config();
        assert_eq!(store.database_path, Some(PathBuf::from("/tmp/msgs.db")));
        assert_eq!(store.list_limit, 5);
    }

    #[test]
    fn test_load_errors() {
        let err = Config::load(Path::new("/nonexistent/portfolio.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = \"not a port\"").unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_generated_database_path_is_resolved() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.storage.database_path, default_database_path());

        let path = config.store_config().database_path.unwrap();
        assert!(!path.starts_with("~"));
        assert!(path.ends_with("messages.db"));
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/var/lib/msgs.db"), PathBuf::from("/var/lib/msgs.db"));
        assert_eq!(expand_home("data/msgs.db"), PathBuf::from("data/msgs.db"));
        assert_eq!(expand_home("~other/msgs.db"), PathBuf::from("~other/msgs.db"));

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/msgs.db"), home.join("msgs.db"));
            assert_eq!(expand_home("~"), home);

            let config: Config =
                toml::from_str("[storage]\ndatabase_path = \"~/portfolio/messages.db\"").unwrap();
            assert_eq!(
                config.store_config().database_path,
                Some(home.join("portfolio").join("messages.db"))
            );
        }
    }

    #[test]
    fn test_discover_skips_malformed_file() {
        let mut broken = tempfile::NamedTempFile::new().unwrap();
        writeln!(broken, "[server\nport = 9000").unwrap();
        let mut good = tempfile::NamedTempFile::new().unwrap();
        writeln!(good, "[storage]\nlist_limit = 7").unwrap();

        let paths = vec![
            PathBuf::from("/nonexistent/portfolio.toml"),
            broken.path().to_path_buf(),
            good.path().to_path_buf(),
        ];
        let (config, report) = Config::discover_in(&paths);

        assert_eq!(config.storage.list_limit, 7);
        assert_eq!(report.source.as_deref(), Some(good.path()));
        assert!(report
            .problems
            .iter()
            .any(|p| matches!(p, ConfigError::Parse { path, .. } if path == broken.path())));
        // Missing files are skipped quietly
        assert!(!report
            .problems
            .iter()
            .any(|p| matches!(p, ConfigError::Io { .. })));
    }

    #[test]
    fn test_discover_falls_back_to_defaults() {
        let mut broken = tempfile::NamedTempFile::new().unwrap();
        writeln!(broken, "not = [valid").unwrap();

        let (config, report) = Config::discover_in(&[broken.path().to_path_buf()]);

        assert!(report.source.is_none());
        assert_eq!(config.storage.list_limit, 100);
        assert!(report
            .problems
            .iter()
            .any(|p| matches!(p, ConfigError::Parse { .. })));
    }

    #[test]
    fn test_invalid_port_override_is_reported() {
        std::env::set_var("PORTFOLIO_PORT", "not-a-port");
        let mut config = Config::default();
        let problems = config.apply_env_overrides();
        std::env::remove_var("PORTFOLIO_PORT");

        assert_eq!(config.server.port, 8001);
        assert!(problems.iter().any(|p| matches!(
            p,
            ConfigError::InvalidEnv { var: "PORTFOLIO_PORT", value } if value == "not-a-port"
        )));
    }
}
