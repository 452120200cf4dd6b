mod retry;

pub use retry::{is_transient, with_retry, RetryPolicy};

use acumba_cache_domain::config::DatabaseConfig;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Schema migrations, embedded so the binary does not depend on its working
/// directory.
pub static MIGRATOR: Migrator = sqlx::migrate!();

fn connect_options(
    database_url: &str,
    cfg: &DatabaseConfig,
) -> Result<SqliteConnectOptions, sqlx::Error> {
    Ok(SqliteConnectOptions::from_str(database_url)?
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_secs(cfg.busy_timeout_secs))
        .pragma("wal_autocheckpoint", cfg.wal_autocheckpoint.to_string()))
}

/// Pool used for lookups (they update hit counters), writes and cleanup.
/// Creates the database file if needed and runs pending migrations.
pub async fn create_write_pool(
    database_url: &str,
    cfg: &DatabaseConfig,
) -> Result<SqlitePool, sqlx::Error> {
    let options = connect_options(database_url, cfg)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(cfg.write_pool_max_connections)
        .connect_with(options)
        .await?;

    MIGRATOR.run(&pool).await?;
    info!(
        max_connections = cfg.write_pool_max_connections,
        "Cache write pool ready"
    );

    Ok(pool)
}

/// Read-only pool for the statistics surface. The database must already
/// exist, so create the write pool first.
pub async fn create_read_pool(
    database_url: &str,
    cfg: &DatabaseConfig,
) -> Result<SqlitePool, sqlx::Error> {
    let options = connect_options(database_url, cfg)?.read_only(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(cfg.read_pool_max_connections)
        .connect_with(options)
        .await?;

    info!(
        max_connections = cfg.read_pool_max_connections,
        "Cache read pool ready"
    );

    Ok(pool)
}
