//! Deterministic summarizer adapter.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::task::ports::{Summarizer, SummarizerError, SummarizerResult};

/// Summarizer that replays queued replies without reaching any upstream.
///
/// Queued replies are consumed in order; once the queue is empty every call
/// returns the fallback reply. An optional delay simulates a slow upstream.
#[derive(Debug, Clone)]
pub struct ScriptedSummarizer {
    state: Arc<ScriptedState>,
}

#[derive(Debug)]
struct ScriptedState {
    queued: Mutex<VecDeque<SummarizerResult<String>>>,
    fallback: SummarizerResult<String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    inputs: Mutex<Vec<String>>,
}

impl ScriptedSummarizer {
    /// Creates a summarizer that always replies with `summary`.
    #[must_use]
    pub fn replying(summary: impl Into<String>) -> Self {
        Self::with_fallback(Ok(summary.into()), None)
    }

    /// Creates a summarizer that always fails with `error`.
    #[must_use]
    pub fn failing(error: SummarizerError) -> Self {
        Self::with_fallback(Err(error), None)
    }

    fn with_fallback(fallback: SummarizerResult<String>, delay: Option<Duration>) -> Self {
        Self {
            state: Arc::new(ScriptedState {
                queued: Mutex::new(VecDeque::new()),
                fallback,
                delay,
                calls: AtomicUsize::new(0),
                inputs: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Returns a copy that waits for `delay` before every reply.
    ///
    /// Queued replies and counters are not carried over.
    #[must_use]
    pub fn delayed_by(&self, delay: Duration) -> Self {
        Self::with_fallback(self.state.fallback.clone(), Some(delay))
    }

    /// Queues a one-off reply ahead of the fallback.
    pub fn enqueue(&self, reply: SummarizerResult<String>) {
        self.state
            .queued
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push_back(reply);
    }

    /// Returns how many times [`Summarizer::summarize`] was called.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.state.calls.load(Ordering::SeqCst)
    }

    /// Returns every text passed to [`Summarizer::summarize`], in call order.
    #[must_use]
    pub fn inputs(&self) -> Vec<String> {
        self.state
            .inputs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Summarizer for ScriptedSummarizer {
    async fn summarize(&self, text: &str) -> SummarizerResult<String> {
        self.state.calls.fetch_add(1, Ordering::SeqCst);
        self.state
            .inputs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(text.to_owned());

        let queued = self
            .state
            .queued
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .pop_front();

        if let Some(delay) = self.state.delay {
            tokio::time::sleep(delay).await;
        }

        queued.unwrap_or_else(|| self.state.fallback.clone())
    }
}
