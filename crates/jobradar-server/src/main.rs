use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use jobradar_client::{LlmSettings, ProviderSettings};
use jobradar_core::rank::Ranker;
use jobradar_core::refresh::{RefreshConfig, RefreshWorker, TracingRefreshReporter};
use jobradar_core::search::SearchService;
use jobradar_db::CacheBackend;
use jobradar_server::config::ServerConfig;
use jobradar_server::routes;
use jobradar_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("jobradar=info".parse()?))
        .with_target(false)
        .init();

    let config = ServerConfig::from_env()?;
    let providers = ProviderSettings::from_env()
        .and_then(|settings| settings.build())
        .context("Invalid provider configuration")?;
    let generator = LlmSettings::from_env()
        .build()
        .context("Invalid LLM configuration")?;
    if generator.is_none() {
        tracing::warn!("No LLM API key configured, results will be returned unranked");
    }
    let cache = CacheBackend::from_env()
        .await
        .context("Failed to initialise result cache")?;
    let filter = config.load_filter()?;

    let search = Arc::new(
        SearchService::new(providers, Ranker::from_option(generator), cache).with_filter(filter),
    );

    let cancel = CancellationToken::new();
    let refresh = config.refresh_interval.map(|interval| {
        let worker = RefreshWorker::new(
            search.clone(),
            RefreshConfig {
                interval,
                ..RefreshConfig::default()
            },
        );
        let token = cancel.clone();
        tokio::spawn(async move { worker.run(token, &TracingRefreshReporter).await })
    });

    let state = Arc::new(AppState::new(search));
    let app = routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {addr}");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel))
        .await?;

    if let Some(handle) = refresh {
        handle.await.context("Refresh worker panicked")?;
    }

    Ok(())
}

async fn shutdown_signal(cancel: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
    }
    tracing::info!("Shutdown signal received");
    cancel.cancel();
}
