//! API configuration
//!
//! Values come from built-in defaults, overridden by `CLAIMS_*` environment
//! variables (`CLAIMS_DATABASE_URL`, `CLAIMS_PORT`, ...). A bare `PORT`
//! variable wins over `CLAIMS_PORT`.

use std::collections::HashMap;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// PostgreSQL connection string
    pub database_url: String,
    /// Maximum pool connections
    pub max_connections: u32,
    /// Log level: trace, debug, info, warn, error
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            database_url: "postgres://localhost/claims".to_string(),
            max_connections: 10,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars().collect())
    }

    /// Loads configuration from an explicit set of environment variables
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let port_override = vars.get("PORT").cloned();

        Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("database_url", defaults.database_url)?
            .set_default("max_connections", i64::from(defaults.max_connections))?
            .set_default("log_level", defaults.log_level)?
            .set_default("log_format", "pretty")?
            .add_source(Environment::with_prefix("CLAIMS").source(Some(vars)))
            .set_override_option("port", port_override)?
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
