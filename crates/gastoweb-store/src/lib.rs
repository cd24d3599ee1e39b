//! SQLite storage adapter for gastoweb
//!
//! A bounded connection pool over a single SQLite database. The schema
//! is embedded and applied idempotently at startup, and the settings
//! singleton is bootstrapped with the store's native
//! `INSERT .. ON CONFLICT DO NOTHING` so concurrent first access is
//! race-safe.

pub mod error;

mod categories;
mod entries;
mod filter_sql;
mod metrics;
mod settings;

use std::str::FromStr;

use gastoweb_core::CoreResult;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

pub use error::map_sqlx_err;
pub use filter_sql::apply_filter;

/// Embedded schema, applied on every startup
const SCHEMA: &str = include_str!("schema.sql");

/// Handle to the SQLite-backed ledger store. Cheap to clone; clones
/// share the underlying pool.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open a bounded pool against `url` and apply the schema
    pub async fn connect(url: &str, max_connections: u32) -> CoreResult<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(map_sqlx_err)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(map_sqlx_err)?;

        let store = SqliteStore { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Apply the embedded schema and bootstrap the settings singleton.
    /// Safe to call repeatedly.
    pub async fn init_schema(&self) -> CoreResult<()> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        self.ensure_settings().await?;
        log::debug!("schema applied");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
