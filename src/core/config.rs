//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (optionally via a `.env` file) or
//! defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Deal store configuration.
    pub store: StoreConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Which back-end holds the deals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// A `deals` table in a SQLite database file.
    Sqlite,

    /// A JSON file loaded once at startup and kept in memory.
    Json,

    /// An empty in-memory store.
    Memory,
}

impl StoreBackend {
    /// Parse a backend name, case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "sqlite" | "db" => Some(Self::Sqlite),
            "json" | "file" => Some(Self::Json),
            "memory" | "mem" => Some(Self::Memory),
            _ => None,
        }
    }
}

/// Deal store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Selected back-end.
    pub backend: StoreBackend,

    /// SQLite database file (sqlite back-end).
    pub database_path: PathBuf,

    /// Deals file (json back-end).
    pub deals_file: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Sqlite,
            database_path: PathBuf::from("sales.db"),
            deals_file: PathBuf::from("deals.json"),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "sales-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            store: StoreConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_STORE_BACKEND`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        config.store = StoreConfig::from_env();

        config
    }
}

impl StoreConfig {
    /// Load store configuration from environment variables.
    pub fn from_env() -> Self {
        let mut store = Self::default();

        if let Ok(backend) = std::env::var("MCP_STORE_BACKEND") {
            match StoreBackend::parse(&backend) {
                Some(parsed) => store.backend = parsed,
                None => warn!(
                    "Unknown MCP_STORE_BACKEND '{}', falling back to sqlite",
                    backend
                ),
            }
        }

        if let Ok(path) = std::env::var("MCP_DATABASE_PATH") {
            store.database_path = PathBuf::from(path);
        }

        if let Ok(path) = std::env::var("MCP_DEALS_FILE") {
            store.deals_file = PathBuf::from(path);
        }

        match store.backend {
            StoreBackend::Sqlite => info!("Deal store: SQLite at {:?}", store.database_path),
            StoreBackend::Json => info!("Deal store: JSON file {:?}", store.deals_file),
            StoreBackend::Memory => info!("Deal store: in-memory (empty)"),
        }

        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn clear_store_env() {
        unsafe {
            std::env::remove_var("MCP_STORE_BACKEND");
            std::env::remove_var("MCP_DATABASE_PATH");
            std::env::remove_var("MCP_DEALS_FILE");
        }
    }

    #[test]
    fn test_store_defaults() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_store_env();
        let store = StoreConfig::from_env();
        assert_eq!(store.backend, StoreBackend::Sqlite);
        assert_eq!(store.database_path, PathBuf::from("sales.db"));
        assert_eq!(store.deals_file, PathBuf::from("deals.json"));
    }

    #[test]
    fn test_store_json_backend_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_store_env();
        unsafe {
            std::env::set_var("MCP_STORE_BACKEND", "JSON");
            std::env::set_var("MCP_DEALS_FILE", "/tmp/pipeline.json");
        }
        let store = StoreConfig::from_env();
        assert_eq!(store.backend, StoreBackend::Json);
        assert_eq!(store.deals_file, PathBuf::from("/tmp/pipeline.json"));
        clear_store_env();
    }

    #[test]
    fn test_unknown_backend_falls_back_to_sqlite() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_store_env();
        unsafe {
            std::env::set_var("MCP_STORE_BACKEND", "postgres");
        }
        let store = StoreConfig::from_env();
        assert_eq!(store.backend, StoreBackend::Sqlite);
        clear_store_env();
    }

    #[test]
    fn test_backend_parse() {
        assert_eq!(StoreBackend::parse("sqlite"), Some(StoreBackend::Sqlite));
        assert_eq!(StoreBackend::parse(" Memory "), Some(StoreBackend::Memory));
        assert_eq!(StoreBackend::parse("file"), Some(StoreBackend::Json));
        assert_eq!(StoreBackend::parse("redis"), None);
    }

    #[test]
    fn test_config_default_server_name() {
        let config = Config::default();
        assert_eq!(config.server.name, "sales-mcp-server");
        assert_eq!(config.logging.level, "info");
    }
}
