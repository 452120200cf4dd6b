use acumba_cache_domain::config::DatabaseConfig;
use acumba_cache_infrastructure::database::{create_read_pool, create_write_pool};
use sqlx::SqlitePool;
use tracing::{error, info};

pub async fn init_database(
    database_url: &str,
    cfg: &DatabaseConfig,
) -> anyhow::Result<(SqlitePool, SqlitePool)> {
    info!("Initializing cache database: {}", database_url);

    let write_pool = create_write_pool(database_url, cfg).await.map_err(|e| {
        error!("Failed to initialize write pool: {}", e);
        anyhow::anyhow!(e)
    })?;

    let read_pool = create_read_pool(database_url, cfg).await.map_err(|e| {
        error!("Failed to initialize read pool: {}", e);
        anyhow::anyhow!(e)
    })?;

    Ok((write_pool, read_pool))
}
