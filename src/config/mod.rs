/// Configuration management for the workforce planner
///
/// Handles server bind settings and the location of the SQLite database.

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Database configuration
    pub database: DatabaseConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server bind address (e.g., "0.0.0.0")
    pub host: String,
    /// Server port number
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Directory holding the database file (default: "data")
    pub data_dir: String,
    /// Database file name inside `data_dir` (default: "workforce.db")
    pub db_file: String,
}

impl Default for Config {
    /// Default configuration with ENV_VAR support for k8s/container deployment
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env_or("WORKFORCE_HOST", "0.0.0.0"),
                port: env_or("WORKFORCE_PORT", "3004").parse().unwrap_or(3004),
            },
            database: DatabaseConfig {
                data_dir: env_or("WORKFORCE_DATA_DIR", "data"),
                db_file: env_or("WORKFORCE_DB_FILE", "workforce.db"),
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
