//! HTTP server exposing the workflow-ai task service.
//!
//! Usage:
//!
//! ```text
//! workflow-ai-server [--listen ADDR] [--database-url URL] [--gemini-api-key KEY]
//! ```
//!
//! Every flag can also be supplied through its environment variable; run
//! with `--help` for the full list. Without `--database-url` tasks live in
//! memory and vanish on exit.

use anyhow::Context;
use clap::Parser;
use mockable::DefaultClock;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use workflow_ai::{
    api,
    config::ServerConfig,
    task::{
        adapters::{
            gemini::GeminiSummarizer, memory::InMemoryTaskRepository,
            postgres::PostgresTaskRepository, webhook::WebhookTaskNotifier,
        },
        ports::{TaskEventNotifier, TaskRepository},
        services::TaskLifecycleService,
    },
    telemetry,
};

const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    telemetry::init_tracing(&config.log_level);

    match config.database_url.as_deref() {
        Some(database_url) => {
            let repository = PostgresTaskRepository::connect(database_url)
                .await
                .context("connect to task database")?;
            info!("using PostgreSQL task store");
            serve(&config, Arc::new(repository)).await
        }
        None => {
            warn!("DATABASE_URL not set; tasks are kept in memory only");
            serve(&config, Arc::new(InMemoryTaskRepository::new())).await
        }
    }
}

async fn serve<R>(config: &ServerConfig, repository: Arc<R>) -> anyhow::Result<()>
where
    R: TaskRepository + 'static,
{
    let summarizer =
        GeminiSummarizer::new(config.gemini()).context("build Gemini summarizer client")?;
    if !summarizer.is_configured() {
        warn!("GEMINI_API_KEY not set; task analysis will fail");
    }

    let mut service = TaskLifecycleService::new(
        repository,
        Arc::new(summarizer),
        Arc::new(DefaultClock),
    )
    .with_analysis_timeout(config.analysis_timeout());
    if let Some(url) = config.delete_webhook_url.as_deref() {
        let notifier: Arc<dyn TaskEventNotifier> = Arc::new(
            WebhookTaskNotifier::new(url, WEBHOOK_TIMEOUT).context("build deletion webhook")?,
        );
        service = service.with_notifier(notifier);
    }

    let cors = api::cors_layer(&config.cors_origins).context("invalid CORS origin")?;
    let app = api::router(Arc::new(service)).layer(cors);
    let listener = tokio::net::TcpListener::bind(config.listen)
        .await
        .context("bind server listener failed")?;
    info!(address = %config.listen, "workflow-ai server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated with error")
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
