use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "JobRadar API",
        version = "0.1.0",
        description = "Aggregated job search across multiple job boards with optional LLM ranking."
    ),
    paths(crate::routes::search_jobs, crate::routes::health),
    components(schemas(
        crate::dto::JobResponse,
        crate::dto::SearchResponse,
        crate::dto::HealthResponse,
        crate::dto::ErrorResponse,
    )),
    tags(
        (name = "jobs", description = "Job search"),
        (name = "system", description = "Health and system status"),
    )
)]
pub struct ApiDoc;
