//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// SQLite connection URL (default: sqlite://platform.db?mode=rwc).
    pub database_url: String,

    /// Maximum database connections in pool (default: 5).
    pub database_max_connections: u32,

    /// Resource identifiers to register at startup (comma-separated, default: "posts").
    pub resources: Vec<String>,

    /// Whether the session cookie is marked `Secure` (default: false).
    pub cookie_secure: bool,

    /// Directory of templates overriding the built-in ones (optional).
    pub templates_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://platform.db?mode=rwc".to_string());

        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .context("DATABASE_MAX_CONNECTIONS must be a valid u32")?;

        let resources = env::var("RESOURCES")
            .map(|v| parse_list(&v))
            .unwrap_or_else(|_| vec!["posts".to_string()]);

        let cookie_secure = env::var("COOKIE_SECURE")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let templates_dir = env::var("TEMPLATES_DIR").ok().map(PathBuf::from);

        Ok(Self {
            port,
            database_url,
            database_max_connections,
            resources,
            cookie_secure,
            templates_dir,
        })
    }

    /// Configuration for an isolated in-memory database.
    ///
    /// SQLite gives every connection its own `:memory:` database, so the pool
    /// is pinned to a single connection.
    pub fn in_memory() -> Self {
        Self {
            port: 0,
            database_url: "sqlite::memory:".to_string(),
            database_max_connections: 1,
            resources: vec!["posts".to_string()],
            cookie_secure: false,
            templates_dir: None,
        }
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
