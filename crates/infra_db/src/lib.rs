//! Infrastructure Database Layer
//!
//! PostgreSQL storage for the claims service using SQLx. Each claim is one
//! JSONB document keyed by its storage identifier; batches are written in a
//! single transaction.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, ensure_schema, DatabaseConfig, PostgresClaimsAdapter};
//!
//! let pool = create_pool(DatabaseConfig::new(url)).await?;
//! ensure_schema(&pool).await?;
//! let adapter = PostgresClaimsAdapter::new(pool);
//! ```

pub mod adapters;
pub mod error;
pub mod pool;
pub mod repositories;

pub use adapters::PostgresClaimsAdapter;
pub use error::{db_to_port_error, DatabaseError};
pub use pool::{create_lazy_pool, create_pool, ensure_schema, DatabaseConfig, DatabasePool};
pub use repositories::ClaimsRepository;
