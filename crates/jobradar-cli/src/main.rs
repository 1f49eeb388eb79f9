use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use jobradar_client::{LlmSettings, OpenAiGenerator, ProviderClient, ProviderSettings};
use jobradar_core::cache::NullCache;
use jobradar_core::filter::FilterConfig;
use jobradar_core::models::{Job, SearchResult};
use jobradar_core::rank::Ranker;
use jobradar_core::refresh::{
    DEFAULT_REFRESH_LOCATION, DEFAULT_REFRESH_QUERY, RefreshConfig, RefreshWorker,
    TracingRefreshReporter,
};
use jobradar_core::search::{DEFAULT_LOCATION, DEFAULT_QUERY, SearchService};
use jobradar_db::CacheBackend;

type Service = SearchService<ProviderClient, OpenAiGenerator, CacheBackend>;

#[derive(Parser)]
#[command(name = "jobradar", version, about = "Multi-provider job search with LLM ranking")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one search and print the results
    Search {
        /// Search keywords
        #[arg(short, long, default_value = DEFAULT_QUERY)]
        query: String,

        /// Location to search in
        #[arg(short, long, default_value = DEFAULT_LOCATION)]
        location: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Keep a search warm in the cache, refreshing it on an interval until Ctrl-C
    Watch {
        /// Search keywords
        #[arg(short, long, default_value = DEFAULT_REFRESH_QUERY)]
        query: String,

        /// Location to search in
        #[arg(short, long, default_value = DEFAULT_REFRESH_LOCATION)]
        location: String,

        /// Seconds between refreshes
        #[arg(long, env = "JOBRADAR_REFRESH_INTERVAL_SECS", default_value_t = 900)]
        interval_secs: u64,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },
}

#[derive(clap::Args)]
struct PipelineArgs {
    /// JSON file overriding the default filter keywords
    #[arg(long, env = "JOBRADAR_FILTER_CONFIG")]
    filter_config: Option<PathBuf>,

    /// Skip LLM ranking even if an API key is configured
    #[arg(long, default_value_t = false)]
    no_rank: bool,

    /// Bypass the result cache entirely
    #[arg(long, default_value_t = false)]
    no_cache: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Setup tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("jobradar=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Search {
            query,
            location,
            format,
            pipeline,
        } => {
            let service = build_service(&pipeline).await?;
            let result = service.search(Some(&query), Some(&location)).await;
            let stdout = std::io::stdout();
            write_result(&result, format, stdout.lock())?;
        }
        Commands::Watch {
            query,
            location,
            interval_secs,
            pipeline,
        } => {
            anyhow::ensure!(interval_secs > 0, "--interval-secs must be at least 1");
            let service = Arc::new(build_service(&pipeline).await?);
            cmd_watch(service, query, location, Duration::from_secs(interval_secs)).await;
        }
    }

    Ok(())
}

/// Assemble providers, ranker, filter and cache from flags and environment.
async fn build_service(args: &PipelineArgs) -> Result<Service> {
    let providers = ProviderSettings::from_env()
        .and_then(|settings| settings.build())
        .context("Invalid provider configuration")?;

    let ranker = if args.no_rank {
        Ranker::Unavailable
    } else {
        let generator = LlmSettings::from_env()
            .build()
            .context("Invalid LLM configuration")?;
        if generator.is_none() {
            tracing::info!("No LLM API key configured, results will not be ranked");
        }
        Ranker::from_option(generator)
    };

    let cache = if args.no_cache {
        CacheBackend::Disabled(NullCache)
    } else {
        CacheBackend::from_env()
            .await
            .context("Failed to initialise result cache")?
    };

    let filter = load_filter(args.filter_config.as_deref())?;

    tracing::info!(
        providers = providers.len(),
        ranking = ranker.is_available(),
        cache = cache.name(),
        "Search pipeline ready"
    );
    Ok(SearchService::new(providers, ranker, cache).with_filter(filter))
}

fn load_filter(path: Option<&Path>) -> Result<FilterConfig> {
    match path {
        Some(path) => FilterConfig::from_file(path)
            .with_context(|| format!("Failed to load filter config: {}", path.display())),
        None => Ok(FilterConfig::default()),
    }
}

async fn cmd_watch(service: Arc<Service>, query: String, location: String, interval: Duration) {
    let cancel = CancellationToken::new();
    let worker = RefreshWorker::new(
        service,
        RefreshConfig {
            query,
            location,
            interval,
            ..RefreshConfig::default()
        },
    );

    let shutdown = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Ctrl-C received, stopping after the current run");
            shutdown.cancel();
        }
    });

    worker.run(cancel, &TracingRefreshReporter).await;
}

/// Flat CSV row; tags are joined with `;`.
#[derive(Serialize)]
struct JobRow<'a> {
    id: &'a str,
    title: &'a str,
    company: &'a str,
    location: &'a str,
    salary: &'a str,
    source: &'a str,
    posted: &'a str,
    badge: String,
    tags: String,
    url: &'a str,
    description: &'a str,
}

impl<'a> From<&'a Job> for JobRow<'a> {
    fn from(job: &'a Job) -> Self {
        Self {
            id: &job.id,
            title: &job.title,
            company: &job.company,
            location: &job.location,
            salary: &job.salary,
            source: &job.source,
            posted: &job.posted,
            badge: job.badge.to_string(),
            tags: job.tags.join(";"),
            url: &job.url,
            description: &job.description,
        }
    }
}

fn write_result<W: Write>(result: &SearchResult, format: OutputFormat, mut out: W) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, result)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            for job in &result.jobs {
                writer.serialize(JobRow::from(job))?;
            }
            writer.flush()?;
        }
    }
    tracing::info!(
        total = result.jobs.len(),
        source = %result.source,
        cached = result.cached,
        "Search complete"
    );
    Ok(())
}
