//! Database connection pool management
//!
//! Pool configuration and creation for PostgreSQL using SQLx, plus the
//! idempotent schema bootstrap for the claims table.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{info, warn};

use crate::error::DatabaseError;

/// Type alias for the PostgreSQL connection pool
pub type DatabasePool = PgPool;

const CLAIMS_SCHEMA: &str = include_str!("../sql/claims.sql");

/// Configuration options for the database connection pool
///
/// # Example
///
/// ```rust
/// use infra_db::DatabaseConfig;
/// use std::time::Duration;
///
/// let config = DatabaseConfig::new("postgres://localhost/claims")
///     .max_connections(20)
///     .min_connections(1)
///     .connect_timeout(Duration::from_secs(10));
/// assert_eq!(config.max_connections, 20);
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection string
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// How long to wait when acquiring a connection
    pub connect_timeout: Duration,
    /// Maximum lifetime of a connection
    pub max_lifetime: Duration,
    /// Idle timeout before closing a connection
    pub idle_timeout: Duration,
}

impl DatabaseConfig {
    /// Creates a new database configuration with the given connection URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 0,
            connect_timeout: Duration::from_secs(30),
            max_lifetime: Duration::from_secs(30 * 60), // 30 minutes
            idle_timeout: Duration::from_secs(10 * 60), // 10 minutes
        }
    }

    /// Sets the maximum number of connections in the pool
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections to maintain
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection acquire timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the maximum lifetime of a connection
    pub fn max_lifetime(mut self, lifetime: Duration) -> Self {
        self.max_lifetime = lifetime;
        self
    }

    /// Sets the idle timeout before closing a connection
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(self.connect_timeout)
            .max_lifetime(self.max_lifetime)
            .idle_timeout(self.idle_timeout)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::new("postgres://localhost/claims")
    }
}

/// Creates a connection pool, connecting eagerly
///
/// # Errors
///
/// Returns `DatabaseError::ConnectionFailed` if the database cannot be
/// reached within the acquire timeout.
///
/// # Example
///
/// ```rust,ignore
/// use infra_db::{DatabaseConfig, create_pool};
///
/// let config = DatabaseConfig::new("postgres://localhost/claims");
/// let pool = create_pool(config).await?;
/// ```
pub async fn create_pool(config: DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    info!(
        "Creating database pool with max_connections={}, min_connections={}",
        config.max_connections, config.min_connections
    );

    let pool = config
        .pool_options()
        .connect(&config.url)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    info!("Database pool created successfully");
    Ok(pool)
}

/// Creates a pool that opens connections on first use
///
/// Only a malformed URL fails here; an unreachable server shows up later as
/// errors on individual queries.
pub fn create_lazy_pool(config: &DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    warn!("Using lazily-connecting database pool");
    config
        .pool_options()
        .connect_lazy(&config.url)
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))
}

/// Creates the claims table if it does not exist yet
pub async fn ensure_schema(pool: &DatabasePool) -> Result<(), DatabaseError> {
    sqlx::raw_sql(CLAIMS_SCHEMA)
        .execute(pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;
    info!("Claims schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = DatabaseConfig::new("postgres://test")
            .max_connections(50)
            .min_connections(10)
            .connect_timeout(Duration::from_secs(60));

        assert_eq!(config.max_connections, 50);
        assert_eq!(config.min_connections, 10);
        assert_eq!(config.connect_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_schema_is_idempotent_ddl() {
        assert!(CLAIMS_SCHEMA.contains("CREATE TABLE IF NOT EXISTS claims"));
        assert!(CLAIMS_SCHEMA.contains("JSONB"));
    }

    #[tokio::test]
    async fn test_lazy_pool_does_not_connect() {
        let config = DatabaseConfig::new("postgres://127.0.0.1:1/unreachable");
        let pool = create_lazy_pool(&config).unwrap();
        assert_eq!(pool.size(), 0);
    }

    #[tokio::test]
    async fn test_lazy_pool_rejects_bad_url() {
        let config = DatabaseConfig::new("not a url");
        assert!(matches!(
            create_lazy_pool(&config),
            Err(DatabaseError::ConnectionFailed(_))
        ));
    }
}
