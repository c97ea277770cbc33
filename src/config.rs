//! Server configuration from command-line flags and environment variables.

use crate::task::adapters::gemini::{
    DEFAULT_GEMINI_ENDPOINT, DEFAULT_GEMINI_MODEL, GeminiSummarizerConfig,
};
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

/// Origin of the bundled web frontend in development.
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Configuration for the task service binary.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "workflow-ai-server", about = "Task service with one-shot AI summaries")]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    #[arg(long, env = "WORKFLOW_AI_LISTEN", default_value = "127.0.0.1:8000")]
    pub listen: SocketAddr,

    /// `PostgreSQL` connection URL. Tasks are kept in memory when unset.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Gemini API key used for task analysis.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    /// Gemini model name.
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    pub gemini_model: String,

    /// Gemini REST endpoint.
    #[arg(long, env = "GEMINI_ENDPOINT", default_value = DEFAULT_GEMINI_ENDPOINT)]
    pub gemini_endpoint: String,

    /// Upper bound, in seconds, for one summarization call.
    #[arg(
        long,
        env = "WORKFLOW_AI_ANALYSIS_TIMEOUT_SECS",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub analysis_timeout_secs: u64,

    /// Browser origins allowed to call the API, comma separated.
    #[arg(
        long = "cors-origin",
        env = "WORKFLOW_AI_CORS_ORIGINS",
        value_delimiter = ',',
        default_value = DEFAULT_CORS_ORIGIN
    )]
    pub cors_origins: Vec<String>,

    /// URL notified with a JSON payload whenever a task is deleted.
    #[arg(long, env = "WORKFLOW_AI_DELETE_WEBHOOK_URL")]
    pub delete_webhook_url: Option<String>,

    /// Log level used when `RUST_LOG` is not set.
    #[arg(long, env = "WORKFLOW_AI_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl ServerConfig {
    /// Returns the analysis timeout as a [`Duration`].
    #[must_use]
    pub const fn analysis_timeout(&self) -> Duration {
        Duration::from_secs(self.analysis_timeout_secs)
    }

    /// Builds the Gemini adapter configuration.
    ///
    /// The transport timeout matches the analysis timeout; blank keys are
    /// treated as missing.
    #[must_use]
    pub fn gemini(&self) -> GeminiSummarizerConfig {
        GeminiSummarizerConfig {
            api_key: self
                .gemini_api_key
                .clone()
                .filter(|key| !key.trim().is_empty()),
            model: self.gemini_model.clone(),
            endpoint: self.gemini_endpoint.clone(),
            request_timeout: self.analysis_timeout(),
        }
    }
}
