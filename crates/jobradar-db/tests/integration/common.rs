use std::time::Duration;

use jobradar_db::{Database, JobCacheRepository};
use sqlx::postgres::PgPoolOptions;
use testcontainers::core::{ContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};

const CONNECT_RETRIES: u32 = 30;

/// Starts PostgreSQL, applies the crate's migrations and returns the
/// migrated database.
///
/// Keep the returned container alive for the whole test; dropping it stops
/// PostgreSQL.
pub async fn setup_test_db() -> (Database, ContainerAsync<GenericImage>) {
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

    // The readiness message fires once during initdb too, so retry.
    let mut attempt = 0;
    let pool = loop {
        match PgPoolOptions::new().max_connections(5).connect(&url).await {
            Ok(pool) => break pool,
            Err(_) if attempt + 1 < CONNECT_RETRIES => {
                attempt += 1;
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
            Err(e) => panic!("Failed to connect after {CONNECT_RETRIES} attempts: {e}"),
        }
    };

    let db = Database::from_pool(pool);
    db.migrate().await.expect("Failed to run migrations");
    (db, container)
}

pub async fn setup_cache_repo() -> (JobCacheRepository, ContainerAsync<GenericImage>) {
    let (db, container) = setup_test_db().await;
    (db.cache_repo(), container)
}
