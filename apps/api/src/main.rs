mod assessment;
mod config;
mod errors;
mod pipeline;
mod resumes;
mod routes;
mod search;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::assessment::orchestrator::AssessmentOrchestrator;
use crate::assessment::scoring::ThreadRandom;
use crate::config::Config;
use crate::pipeline::ApplicationStore;
use crate::resumes::{InMemoryResumeStore, ResumeRepository};
use crate::routes::build_router;
use crate::search::PostingStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (everything has a default)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobTrail API v{}", env!("CARGO_PKG_VERSION"));

    // In-memory stores; persistence is an external responsibility
    let resumes: Arc<dyn ResumeRepository> = Arc::new(InMemoryResumeStore::new());
    let applications = Arc::new(ApplicationStore::new());
    let postings = Arc::new(PostingStore::new());

    // Assessment orchestrator with the default random source
    let orchestrator = Arc::new(AssessmentOrchestrator::new(
        Arc::clone(&resumes),
        Arc::new(ThreadRandom),
        Duration::from_millis(config.assessment_step_ms),
    ));
    info!(
        "Assessment orchestrator initialized (step delay: {}ms)",
        config.assessment_step_ms
    );

    // Build app state
    let state = AppState {
        resumes,
        orchestrator,
        applications,
        postings,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
