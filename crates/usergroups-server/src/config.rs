//! Server configuration read from environment variables.
//!
//! - `USERGROUPS_DB_PATH`: SQLite database file path (default: "usergroups.db")
//! - `USERGROUPS_HOST`: listen address (default: "0.0.0.0")
//! - `USERGROUPS_PORT`: listen port (default: 8080)
//! - `USERGROUPS_BUSY_TIMEOUT_MS`: how long a write waits for the database
//!   lock (default: 5000)
//! - `USERGROUPS_POOL_SIZE`: pooled database connections (default: 8)
//!
//! A variable that is set but unparsable is an error rather than a silent
//! fallback to the default.

use std::path::PathBuf;
use std::time::Duration;

use usergroups_storage::database::{DEFAULT_BUSY_TIMEOUT, DEFAULT_POOL_SIZE};
use usergroups_storage::DatabaseConfig;

pub const DB_PATH_VAR: &str = "USERGROUPS_DB_PATH";
pub const HOST_VAR: &str = "USERGROUPS_HOST";
pub const PORT_VAR: &str = "USERGROUPS_PORT";
pub const BUSY_TIMEOUT_VAR: &str = "USERGROUPS_BUSY_TIMEOUT_MS";
pub const POOL_SIZE_VAR: &str = "USERGROUPS_POOL_SIZE";

/// Configuration errors detected at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a number, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{var} must be at least 1")]
    Zero { var: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub db_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub busy_timeout: Duration,
    pub pool_size: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            db_path: PathBuf::from("usergroups.db"),
            host: "0.0.0.0".to_string(),
            port: 8080,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
            pool_size: DEFAULT_POOL_SIZE,
        }
    }
}

impl ServerConfig {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = ServerConfig::default();
        if let Some(path) = lookup(DB_PATH_VAR) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(host) = lookup(HOST_VAR) {
            config.host = host;
        }
        if let Some(port) = lookup(PORT_VAR) {
            config.port = parse_number(PORT_VAR, port)?;
        }
        if let Some(ms) = lookup(BUSY_TIMEOUT_VAR) {
            config.busy_timeout = Duration::from_millis(parse_number(BUSY_TIMEOUT_VAR, ms)?);
        }
        if let Some(size) = lookup(POOL_SIZE_VAR) {
            config.pool_size = parse_number(POOL_SIZE_VAR, size)?;
            if config.pool_size == 0 {
                return Err(ConfigError::Zero { var: POOL_SIZE_VAR });
            }
        }
        Ok(config)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn database(&self) -> DatabaseConfig {
        DatabaseConfig::new(self.db_path.clone())
            .with_busy_timeout(self.busy_timeout)
            .with_pool_size(self.pool_size)
    }
}

fn parse_number<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { var, value })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.listen_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn overrides_apply() {
        let config = ServerConfig::from_lookup(lookup(&[
            (DB_PATH_VAR, "/var/lib/dir.db"),
            (HOST_VAR, "127.0.0.1"),
            (PORT_VAR, "9000"),
            (BUSY_TIMEOUT_VAR, "250"),
            (POOL_SIZE_VAR, "4"),
        ]))
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/var/lib/dir.db"));
        assert_eq!(config.listen_addr(), "127.0.0.1:9000");
        assert_eq!(config.database().busy_timeout, Duration::from_millis(250));
        assert_eq!(config.database().pool_size, 4);
    }

    #[test]
    fn bad_port_is_an_error() {
        let err = ServerConfig::from_lookup(lookup(&[(PORT_VAR, "eighty")])).unwrap_err();
        assert_eq!(err.to_string(), "USERGROUPS_PORT must be a number, got 'eighty'");
    }

    #[test]
    fn empty_pool_is_an_error() {
        let err = ServerConfig::from_lookup(lookup(&[(POOL_SIZE_VAR, "0")])).unwrap_err();
        assert_eq!(err.to_string(), "USERGROUPS_POOL_SIZE must be at least 1");
    }
}
