pub mod backend;
pub mod cache_repository;
pub mod config;
pub mod database;

pub use backend::CacheBackend;
pub use cache_repository::JobCacheRepository;
pub use config::DatabaseConfig;
pub use database::Database;
