use std::env;
use tracing::{debug, warn};

/// Database connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// sqlx connection URL, e.g. `sqlite://accounts.db`.
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Load database configuration from environment variables
    ///
    /// Expected environment variables:
    /// - DATABASE_URL: sqlx connection URL (defaults to `sqlite://accounts.db`)
    /// - DATABASE_MAX_CONNECTIONS: pool size (defaults to 5)
    pub fn from_env() -> Self {
        let url = env::var("DATABASE_URL").unwrap_or_else(|_| {
            warn!("DATABASE_URL not set, using default: sqlite://accounts.db");
            "sqlite://accounts.db".to_string()
        });
        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);
        debug!("Database configuration loaded (pool size: {})", max_connections);
        DatabaseConfig { url, max_connections }
    }
}
