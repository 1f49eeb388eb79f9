use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use jobradar_client::{ProviderClient, RemotiveProvider};
use jobradar_core::cache::{CacheKey, MemoryCache};
use jobradar_core::models::Job;
use jobradar_core::normalize::normalize;
use jobradar_core::search::{DEFAULT_LOCATION, DEFAULT_QUERY};
use jobradar_core::traits::ResultCache;
use jobradar_db::CacheBackend;

use crate::integration::common::{app_with_providers, setup_memory_app, setup_postgres_app};

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

fn seeded_jobs() -> Vec<Job> {
    vec![
        normalize(
            &json!({
                "title": "React Developer",
                "company": { "display_name": "Acme" },
                "location": { "display_name": "Remote" }
            }),
            "adzuna",
            0,
        ),
        normalize(
            &json!({ "job_title": "ignored", "title": "Node.js Engineer", "company": "Zeta" }),
            "jsearch",
            3,
        ),
    ]
}

async fn seed(cache: &MemoryCache, query: &str, location: &str) {
    cache
        .put(
            &CacheKey::new(query, location),
            &seeded_jobs(),
            Duration::from_secs(900),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn health_reports_memory_cache() {
    let (app, _cache) = setup_memory_app();

    let (status, json) = get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["cache"], "memory");
    assert_eq!(json["providers"], json!([]));
    assert_eq!(json["ranking"], false);
}

#[tokio::test]
async fn search_serves_cached_result() {
    let (app, cache) = setup_memory_app();
    seed(&cache, "react", "remote").await;

    let (status, json) = get_json(app, "/api/jobs?query=React&location=Remote").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cached"], true);
    assert_eq!(json["total"], 2);
    assert_eq!(json["source"], "adzuna, jsearch");
    assert!(json["timestamp"].is_string());

    let first = &json["jobs"][0];
    assert_eq!(first["id"], "adzuna-1");
    assert_eq!(first["company"], "Acme");
    assert_eq!(first["badge"], "featured");
    assert_eq!(first["tags"], json!(["ADZUNA", "Live API", "Verified"]));
    assert_eq!(json["jobs"][1]["badge"], "new");
}

#[tokio::test]
async fn search_applies_default_parameters() {
    let (app, cache) = setup_memory_app();
    seed(&cache, DEFAULT_QUERY, DEFAULT_LOCATION).await;

    let (status, json) = get_json(app, "/api/jobs?query=&location=").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cached"], true);
    assert_eq!(json["total"], 2);
}

#[tokio::test]
async fn empty_aggregation_is_cached() {
    let (app, _cache) = setup_memory_app();

    let (_, first) = get_json(app.clone(), "/api/jobs?query=rust&location=berlin").await;
    let (_, second) = get_json(app, "/api/jobs?query=rust&location=berlin").await;

    assert_eq!(first["total"], 0);
    assert_eq!(first["source"], "none");
    assert_eq!(first["cached"], false);
    assert_eq!(second["cached"], true);
}

#[tokio::test]
async fn failing_provider_still_returns_200() {
    let unreachable = ProviderClient::Remotive(
        RemotiveProvider::new()
            .unwrap()
            .with_base_url("http://127.0.0.1:9"),
    );
    let app = app_with_providers(vec![unreachable], CacheBackend::Memory(MemoryCache::new()));

    let (status, json) = get_json(app, "/api/jobs?query=node&location=remote").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 0);
    assert_eq!(json["jobs"], json!([]));
}

#[tokio::test]
async fn overlong_query_is_rejected() {
    let (app, _cache) = setup_memory_app();
    let query = "a".repeat(201);

    let (status, json) = get_json(app, &format!("/api/jobs?query={query}")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_request");
}

#[tokio::test]
async fn openapi_document_lists_routes() {
    let (app, _cache) = setup_memory_app();

    let (status, json) = get_json(app, "/api-docs/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["paths"]["/api/jobs"].is_object());
    assert!(json["paths"]["/health"].is_object());
}

#[tokio::test]
async fn postgres_cache_round_trip_over_http() {
    let (app, _container) = setup_postgres_app().await;

    let (status, health) = get_json(app.clone(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["cache"], "postgres");

    let (_, first) = get_json(app.clone(), "/api/jobs?query=Node&location=Pune").await;
    let (_, second) = get_json(app, "/api/jobs?query=node&location=pune").await;

    assert_eq!(first["cached"], false);
    assert_eq!(second["cached"], true);
    assert_eq!(second["source"], "none");
}
