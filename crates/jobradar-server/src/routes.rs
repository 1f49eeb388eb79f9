use std::sync::Arc;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use jobradar_core::error::AppError;
use jobradar_core::traits::JobProvider;

use crate::dto::{HealthResponse, SearchQuery, SearchResponse};
use crate::error::ApiError;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Longest accepted `query` or `location`, in characters.
pub const MAX_PARAM_CHARS: usize = 200;

/// Build the full router with all routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/jobs", get(search_jobs))
        .route("/health", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/jobs",
    params(SearchQuery),
    responses(
        (status = 200, description = "Filtered, deduplicated and ranked jobs", body = SearchResponse),
        (status = 400, description = "Parameter too long", body = crate::dto::ErrorResponse),
    ),
    tag = "jobs"
)]
pub async fn search_jobs(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    check_length("query", params.query.as_deref())?;
    check_length("location", params.location.as_deref())?;

    let result = state
        .search
        .search(params.query.as_deref(), params.location.as_deref())
        .await;

    Ok(axum::Json(SearchResponse::from(result)))
}

fn check_length(name: &str, value: Option<&str>) -> Result<(), AppError> {
    match value {
        Some(v) if v.chars().count() > MAX_PARAM_CHARS => Err(AppError::InvalidRequest(format!(
            "'{name}' must be at most {MAX_PARAM_CHARS} characters"
        ))),
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Result cache is unreachable", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let search = &state.search;
    let cache = search.cache();

    let (status, label) = match cache.health_check().await {
        Ok(()) => (StatusCode::OK, "healthy"),
        Err(e) => {
            tracing::warn!(error = %e, cache = cache.name(), "Cache health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
        }
    };

    let response = HealthResponse {
        status: label,
        cache: cache.name(),
        providers: search
            .providers()
            .iter()
            .map(|p| p.name().to_string())
            .collect(),
        ranking: search.ranker().is_available(),
    };

    (status, axum::Json(response))
}
