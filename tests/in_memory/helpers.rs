//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use workflow_ai::task::{
    adapters::memory::{InMemoryTaskRepository, ScriptedSummarizer},
    domain::Task,
    services::{CreateTaskRequest, TaskLifecycleService},
};

/// Service type wired to in-memory adapters.
pub type TestService =
    TaskLifecycleService<InMemoryTaskRepository, ScriptedSummarizer, DefaultClock>;

/// Service plus the scripted summarizer behind it.
pub struct Harness {
    pub service: Arc<TestService>,
    pub summarizer: Arc<ScriptedSummarizer>,
}

impl Harness {
    /// Builds a harness around `summarizer`.
    pub fn with_summarizer(scripted: ScriptedSummarizer) -> Self {
        let summarizer = Arc::new(scripted);
        let service = TaskLifecycleService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::clone(&summarizer),
            Arc::new(DefaultClock),
        );
        Self {
            service: Arc::new(service),
            summarizer,
        }
    }

    /// Creates a task with `title` and `description`.
    ///
    /// # Errors
    ///
    /// Returns an error if the service rejects the task.
    pub async fn create(&self, title: &str, description: &str) -> Result<Task, eyre::Report> {
        let request = CreateTaskRequest::new(title).with_description(description);
        Ok(self.service.create_task(request).await?)
    }
}

/// Provides a harness whose summarizer echoes a fixed reply.
#[fixture]
pub fn harness() -> Harness {
    Harness::with_summarizer(ScriptedSummarizer::replying("A short summary"))
}
