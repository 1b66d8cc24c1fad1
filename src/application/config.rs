use once_cell::sync::Lazy;
use std::env;

/// Database connection settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("CONFIG_MTRX_DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://computers.db?mode=rwc".to_string()),
            max_connections: env::var("CONFIG_MTRX_DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            min_connections: env::var("CONFIG_MTRX_DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
            connect_timeout_secs: env::var("CONFIG_MTRX_DB_CONNECT_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,

    // Logging
    pub log_level: String,

    // Build info
    pub version: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database: DatabaseConfig::from_env(),
            log_level: env::var("CONFIG_MTRX_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        let config = Config::from_env();
        assert!(!config.database.database_url.is_empty());
        assert!(config.database.max_connections >= config.database.min_connections);
        assert_eq!(config.version, env!("CARGO_PKG_VERSION"));
    }
}
