use acumba_cache_domain::Config;
use acumba_cache_infrastructure::repositories::SqliteResponseCacheRepository;
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct Repositories {
    pub cache: Arc<SqliteResponseCacheRepository>,
}

impl Repositories {
    pub fn new(write_pool: SqlitePool, read_pool: SqlitePool, config: &Config) -> Self {
        Self {
            cache: Arc::new(SqliteResponseCacheRepository::new(
                write_pool,
                read_pool,
                &config.database,
            )),
        }
    }
}
