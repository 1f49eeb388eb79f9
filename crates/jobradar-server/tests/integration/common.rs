use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use testcontainers::core::{ContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};

use jobradar_client::ProviderClient;
use jobradar_core::cache::MemoryCache;
use jobradar_core::rank::Ranker;
use jobradar_core::search::SearchService;
use jobradar_db::{CacheBackend, Database};
use jobradar_server::routes;
use jobradar_server::state::AppState;

/// Router over an empty provider list, no ranking and the given cache.
pub fn app_with_cache(cache: CacheBackend) -> Router {
    app_with_providers(Vec::new(), cache)
}

pub fn app_with_providers(providers: Vec<ProviderClient>, cache: CacheBackend) -> Router {
    let search = SearchService::new(providers, Ranker::Unavailable, cache);
    routes::router(Arc::new(AppState::new(Arc::new(search))))
}

/// In-memory app plus a handle on its cache so tests can seed entries.
pub fn setup_memory_app() -> (Router, MemoryCache) {
    let cache = MemoryCache::new();
    (app_with_cache(CacheBackend::Memory(cache.clone())), cache)
}

/// App backed by a migrated PostgreSQL container.
pub async fn setup_postgres_app() -> (Router, ContainerAsync<GenericImage>) {
    let container = GenericImage::new("postgres", "16")
        .with_exposed_port(ContainerPort::Tcp(5432))
        .with_wait_for(WaitFor::message_on_stderr(
            "database system is ready to accept connections",
        ))
        .with_env_var("POSTGRES_PASSWORD", "postgres")
        .with_env_var("POSTGRES_DB", "jobradar_test")
        .start()
        .await
        .expect("Failed to start PostgreSQL container");

    let host = container.get_host().await.expect("Failed to get host");
    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to get port");
    let url = format!("postgresql://postgres:postgres@{host}:{port}/jobradar_test");

    let db = Database::from_pool(retry_connect(&url).await);
    db.migrate().await.expect("Failed to run migrations");

    (app_with_cache(CacheBackend::Postgres(db.cache_repo())), container)
}

async fn retry_connect(url: &str) -> sqlx::PgPool {
    for _ in 0..30 {
        if let Ok(pool) = PgPoolOptions::new().max_connections(5).connect(url).await {
            return pool;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    panic!("Failed to connect to test database");
}
