pub mod response_cache_repository;

pub use response_cache_repository::SqliteResponseCacheRepository;
