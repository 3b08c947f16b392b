//! Claims Spreadsheet Import Binary
//!
//! Loads every row of the first worksheet into the claims table as one
//! batch. Any rejected row or storage failure aborts the whole import.
//! Running it twice on the same file inserts the claims twice.
//!
//! # Usage
//!
//! ```bash
//! claims-import claims.xlsx --database-url postgres://...
//! claims-import claims.xlsx --dry-run
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use domain_claims::{prepare_batch, ClaimImporter};
use infra_db::{create_pool, ensure_schema, DatabaseConfig, PostgresClaimsAdapter};
use infra_sheet::WorkbookReader;
use interface_api::{config::ApiConfig, telemetry::init_tracing};

/// Import claims from a spreadsheet
#[derive(Debug, Parser)]
#[command(name = "claims-import", version, about)]
struct Args {
    /// Workbook to import (xlsx, xlsm, xlsb, xls or ods)
    path: PathBuf,

    /// PostgreSQL connection string
    #[arg(long, env = "CLAIMS_DATABASE_URL")]
    database_url: Option<String>,

    /// Map and validate every row without writing anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = ApiConfig::from_env().context("invalid configuration")?;
    init_tracing(&config.log_level, config.log_format);

    let reader = WorkbookReader::new(&args.path);

    if args.dry_run {
        let rows = reader.rows()?;
        let records = prepare_batch(&rows)?;
        tracing::info!(rows = rows.len(), valid = records.len(), "Dry run complete, nothing written");
        return Ok(());
    }

    let database_url = args.database_url.unwrap_or(config.database_url);
    let pool = create_pool(DatabaseConfig::new(database_url).max_connections(config.max_connections))
        .await
        .context("failed to connect to database")?;

    let result = async {
        ensure_schema(&pool).await?;
        let importer = ClaimImporter::new(Arc::new(PostgresClaimsAdapter::new(pool.clone())));
        anyhow::Ok(importer.import(&reader).await?)
    }
    .await;

    pool.close().await;

    match result {
        Ok(summary) => {
            tracing::info!(
                path = %args.path.display(),
                rows = summary.rows_read,
                inserted = summary.records_inserted,
                "Import finished"
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!(path = %args.path.display(), error = %e, "Import failed, nothing was written");
            Err(e)
        }
    }
}
