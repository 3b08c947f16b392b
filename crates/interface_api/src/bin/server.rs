//! Claims API Server Binary
//!
//! # Usage
//!
//! ```bash
//! CLAIMS_DATABASE_URL=postgres://... claims-api
//! PORT=8080 claims-api
//! ```
//!
//! # Environment Variables
//!
//! * `CLAIMS_HOST` - Server host (default: 0.0.0.0)
//! * `CLAIMS_PORT` / `PORT` - Server port (default: 3000)
//! * `CLAIMS_DATABASE_URL` - PostgreSQL connection string
//! * `CLAIMS_MAX_CONNECTIONS` - Pool size (default: 10)
//! * `CLAIMS_LOG_LEVEL` - trace, debug, info, warn, error (default: info)
//! * `CLAIMS_LOG_FORMAT` - pretty or json (default: pretty)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use domain_claims::ClaimsService;
use infra_db::{create_lazy_pool, create_pool, ensure_schema, DatabaseConfig, DatabasePool, PostgresClaimsAdapter};
use interface_api::{config::ApiConfig, create_router, telemetry::init_tracing, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("invalid configuration")?;
    init_tracing(&config.log_level, config.log_format);

    tracing::info!(host = %config.host, port = %config.port, "Starting claims API server");

    let db_config = DatabaseConfig::new(&config.database_url).max_connections(config.max_connections);
    let pool = connect(&db_config).await?;

    let service = ClaimsService::new(Arc::new(PostgresClaimsAdapter::new(pool.clone())));
    let app = create_router(AppState::new(service, config.clone()));

    let addr: SocketAddr = config.server_addr().parse().context("invalid server address")?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Connects to the database, falling back to a lazy pool when it is down
///
/// The server keeps serving either way; reads fail until the database is
/// reachable.
async fn connect(db_config: &DatabaseConfig) -> anyhow::Result<DatabasePool> {
    match create_pool(db_config.clone()).await {
        Ok(pool) => {
            if let Err(e) = ensure_schema(&pool).await {
                tracing::error!(error = %e, "Failed to prepare claims schema");
            }
            Ok(pool)
        }
        Err(e) => {
            tracing::error!(error = %e, "Database connection failed, continuing without it");
            Ok(create_lazy_pool(db_config)?)
        }
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
