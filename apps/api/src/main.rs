mod assessments;
mod config;
mod cover_letters;
mod dashboard;
mod db;
mod errors;
mod insights;
mod job_search;
mod linkedin;
mod llm_client;
mod models;
mod profile;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::insights::scheduler::start_insight_scheduler;
use crate::insights::{InsightRefreshJob, PgInsightStore};
use crate::job_search::JobSearchClient;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerPal API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize LLM client (interactive endpoints, retries enabled)
    let llm = LlmClient::new(config.anthropic_api_key.clone(), config.llm_timeout)
        .context("LLM client configuration")?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Insight refresh job: shared by the scheduler and the manual trigger
    let insight_job = InsightRefreshJob::from_config(&config, db.clone())
        .context("insight refresh configuration")?;

    let mut scheduler = if config.insights.enabled {
        Some(start_insight_scheduler(insight_job.clone(), &config.insights.cron).await?)
    } else {
        warn!("Insight refresh scheduler disabled (INSIGHT_REFRESH_ENABLED=false)");
        None
    };

    let job_search = match &config.jooble_api_key {
        Some(key) => Some(JobSearchClient::new(key.clone())?),
        None => {
            warn!("JOOBLE_API_KEY not set; job search will respond 503");
            None
        }
    };

    // Build app state
    let state = AppState {
        db: db.clone(),
        llm,
        insight_store: Arc::new(PgInsightStore::new(db)),
        insight_job,
        job_search,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web frontend domain is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(scheduler) = scheduler.as_mut() {
        scheduler
            .shutdown()
            .await
            .context("stopping insight refresh scheduler")?;
    }
    info!("Shut down cleanly");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
