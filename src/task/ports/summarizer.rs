//! Summarizer port for the external AI summarization capability.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type for summarizer operations.
pub type SummarizerResult<T> = Result<T, SummarizerError>;

/// Produces a short summary for a non-empty piece of text.
///
/// Implementations make a single attempt per call. Retries and time limits
/// belong to the caller.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarizes `text`.
    ///
    /// # Errors
    ///
    /// Returns [`SummarizerError`] when the upstream capability fails or
    /// replies with something unusable.
    async fn summarize(&self, text: &str) -> SummarizerResult<String>;
}

/// Errors returned by summarizer adapters.
#[derive(Debug, Clone, Error)]
pub enum SummarizerError {
    /// The adapter has no credentials to reach its upstream.
    #[error("summarizer is not configured: {0}")]
    NotConfigured(String),

    /// The call did not finish within the allowed time.
    #[error("summarizer timed out after {0:?}")]
    Timeout(Duration),

    /// The upstream service reported an error.
    #[error("summarizer upstream error: {0}")]
    Upstream(String),

    /// The upstream reply could not be used as a summary.
    #[error("malformed summarizer response: {0}")]
    MalformedResponse(String),

    /// Transport-level failure reaching the upstream.
    #[error("summarizer transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl SummarizerError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
