//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables, a `.env` file, or defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Database connection and migration settings.
    pub database: DatabaseConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Database configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Postgres connection URL. Tools report an error while this is unset.
    pub url: Option<String>,

    /// Schema that `list_tables` and `describe_table` inspect.
    pub schema: String,

    /// Upper bound on pooled connections.
    pub max_connections: u32,

    /// How long a tool call waits for a connection before failing.
    pub acquire_timeout_secs: u64,

    /// Directory named in generated migration file paths.
    pub migrations_dir: String,
}

/// Custom Debug implementation to keep credentials in the URL out of logs.
impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "[REDACTED]"))
            .field("schema", &self.schema)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .field("migrations_dir", &self.migrations_dir)
            .finish()
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            schema: "public".to_string(),
            max_connections: 5,
            acquire_timeout_secs: 5,
            migrations_dir: "migrations".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "tms-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            database: DatabaseConfig::default(),
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
    /// Server settings use the `MCP_` prefix (`MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`, `MCP_DB_SCHEMA`, ...). The connection URL is read from
    /// `MCP_DATABASE_URL`, then `DATABASE_URL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();

        let url = std::env::var("MCP_DATABASE_URL")
            .or_else(|_| std::env::var("DATABASE_URL"))
            .ok()
            .filter(|url| !url.trim().is_empty());
        if url.is_some() {
            info!("Database URL loaded from environment");
        } else {
            warn!(
                "DATABASE_URL not set - database tools will return errors \
                 until a connection URL is configured"
            );
        }
        config.database.url = url;

        if let Ok(schema) = std::env::var("MCP_DB_SCHEMA") {
            config.database.schema = schema;
        }

        if let Ok(max) = std::env::var("MCP_DB_MAX_CONNECTIONS") {
            match max.parse() {
                Ok(max) if max > 0 => config.database.max_connections = max,
                _ => warn!("Ignoring invalid MCP_DB_MAX_CONNECTIONS: {}", max),
            }
        }

        if let Ok(timeout) = std::env::var("MCP_DB_ACQUIRE_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => config.database.acquire_timeout_secs = secs,
                Err(_) => warn!("Ignoring invalid MCP_DB_ACQUIRE_TIMEOUT_SECS: {}", timeout),
            }
        }

        if let Ok(dir) = std::env::var("MCP_MIGRATIONS_DIR") {
            config.database.migrations_dir = dir;
        }

        config
    }
}
