use std::time::Duration;

use jobradar_core::cache::CacheKey;
use jobradar_core::models::Job;
use jobradar_core::normalize::normalize;
use jobradar_core::traits::ResultCache;
use serde_json::json;

use crate::integration::common::{setup_cache_repo, setup_test_db};

fn sample_jobs() -> Vec<Job> {
    vec![
        normalize(
            &json!({
                "title": "Senior Node.js Developer",
                "company": { "display_name": "Acme" },
                "location": { "display_name": "Bengaluru" },
                "salary_min": 1500000,
                "salary_max": 2500000,
                "created": "2025-05-02T09:00:00Z"
            }),
            "adzuna",
            0,
        ),
        normalize(&json!({ "title": "MERN Engineer" }), "jsearch", 4),
    ]
}

#[tokio::test]
async fn put_and_get_round_trip() {
    let (repo, _container) = setup_cache_repo().await;
    let key = CacheKey::new("Node.js", "Bengaluru");

    repo.put(&key, &sample_jobs(), Duration::from_secs(900))
        .await
        .unwrap();

    let cached = repo
        .get(&CacheKey::new("node.js ", "BENGALURU"))
        .await
        .unwrap()
        .expect("entry should be live");
    assert_eq!(cached, sample_jobs());
    assert_eq!(repo.live_entries().await.unwrap(), 1);
}

#[tokio::test]
async fn unknown_key_is_a_miss() {
    let (repo, _container) = setup_cache_repo().await;
    let result = repo.get(&CacheKey::new("go", "berlin")).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn expired_entry_is_not_served() {
    let (repo, _container) = setup_cache_repo().await;
    let key = CacheKey::new("node", "remote");

    repo.put(&key, &sample_jobs(), Duration::from_millis(200))
        .await
        .unwrap();
    assert!(repo.get(&key).await.unwrap().is_some());

    tokio::time::sleep(Duration::from_millis(500)).await;

    assert!(repo.get(&key).await.unwrap().is_none());
    assert_eq!(repo.purge_expired().await.unwrap(), 1);
}

#[tokio::test]
async fn put_overwrites_existing_entry() {
    let (repo, _container) = setup_cache_repo().await;
    let key = CacheKey::new("node", "remote");

    repo.put(&key, &sample_jobs(), Duration::from_secs(60))
        .await
        .unwrap();
    let newer = vec![normalize(&json!({ "title": "React Dev" }), "remotive", 0)];
    repo.put(&key, &newer, Duration::from_secs(60)).await.unwrap();

    assert_eq!(repo.get(&key).await.unwrap(), Some(newer));
    assert_eq!(repo.live_entries().await.unwrap(), 1);
}

#[tokio::test]
async fn put_purges_other_expired_rows() {
    let (repo, _container) = setup_cache_repo().await;
    let stale = CacheKey::new("java", "pune");
    repo.put(&stale, &sample_jobs(), Duration::from_millis(100))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(300)).await;

    repo.put(&CacheKey::new("node", "remote"), &sample_jobs(), Duration::from_secs(60))
        .await
        .unwrap();

    // Nothing left for an explicit purge to remove.
    assert_eq!(repo.purge_expired().await.unwrap(), 0);
}

#[tokio::test]
async fn health_check_succeeds() {
    let (db, _container) = setup_test_db().await;
    db.health_check().await.unwrap();
}
