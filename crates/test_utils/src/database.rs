//! Database Test Utilities
//!
//! Starts a disposable PostgreSQL container with the claims schema applied.

use std::time::Duration;

use testcontainers::{
    core::{IntoContainerPort, WaitFor},
    runners::AsyncRunner,
    ContainerAsync, GenericImage, ImageExt,
};

use infra_db::{create_pool, ensure_schema, DatabaseConfig, DatabasePool};

const POSTGRES_IMAGE: &str = "postgres";
const POSTGRES_TAG: &str = "16-alpine";
const POSTGRES_USER: &str = "test_user";
const POSTGRES_PASSWORD: &str = "test_password";
const POSTGRES_DB: &str = "claims_test";

const CONNECT_ATTEMPTS: u32 = 10;

/// A wrapper around a PostgreSQL test container
pub struct TestDatabase {
    _container: ContainerAsync<GenericImage>,
    pub url: String,
    pub pool: DatabasePool,
}

impl TestDatabase {
    /// Starts a new PostgreSQL container and creates the claims table
    ///
    /// # Errors
    ///
    /// Returns an error if the container fails to start or the schema cannot
    /// be applied
    pub async fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let container = GenericImage::new(POSTGRES_IMAGE, POSTGRES_TAG)
            .with_exposed_port(5432.tcp())
            .with_wait_for(WaitFor::message_on_stderr(
                "database system is ready to accept connections",
            ))
            .with_env_var("POSTGRES_USER", POSTGRES_USER)
            .with_env_var("POSTGRES_PASSWORD", POSTGRES_PASSWORD)
            .with_env_var("POSTGRES_DB", POSTGRES_DB)
            .start()
            .await?;

        let host = container.get_host().await?;
        let port = container.get_host_port_ipv4(5432).await?;
        let url = format!(
            "postgres://{POSTGRES_USER}:{POSTGRES_PASSWORD}@{host}:{port}/{POSTGRES_DB}"
        );

        // The init script restarts the server once, so the first ready
        // message can arrive before the final listener is up.
        let mut attempt = 1;
        let pool = loop {
            let config = DatabaseConfig::new(&url).max_connections(5);
            match create_pool(config).await {
                Ok(pool) => break pool,
                Err(_) if attempt < CONNECT_ATTEMPTS => {
                    attempt += 1;
                    tokio::time::sleep(Duration::from_millis(500)).await;
                }
                Err(e) => return Err(e.into()),
            }
        };

        ensure_schema(&pool).await?;

        Ok(Self {
            _container: container,
            url,
            pool,
        })
    }

    /// Gets a clone of the connection pool
    pub fn pool(&self) -> DatabasePool {
        self.pool.clone()
    }

    /// Removes every stored claim
    pub async fn clear_data(&self) -> Result<(), sqlx::Error> {
        sqlx::query("TRUNCATE TABLE claims").execute(&self.pool).await?;
        Ok(())
    }
}
