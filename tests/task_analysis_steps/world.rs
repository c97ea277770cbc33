//! Shared world state for task analysis BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use workflow_ai::task::{
    adapters::memory::{InMemoryTaskRepository, ScriptedSummarizer},
    domain::Task,
    services::{TaskLifecycleError, TaskLifecycleService},
};

/// Service type used by the BDD world.
pub type TestTaskService =
    TaskLifecycleService<InMemoryTaskRepository, ScriptedSummarizer, DefaultClock>;

/// Scenario world for task analysis behaviour tests.
pub struct TaskAnalysisWorld {
    pub repository: Arc<InMemoryTaskRepository>,
    pub summarizer: Option<Arc<ScriptedSummarizer>>,
    pub service: Option<TestTaskService>,
    pub current_task: Option<Task>,
    pub last_analysis_result: Option<Result<Task, TaskLifecycleError>>,
}

impl TaskAnalysisWorld {
    /// Creates a world with no summarizer chosen yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            repository: Arc::new(InMemoryTaskRepository::new()),
            summarizer: None,
            service: None,
            current_task: None,
            last_analysis_result: None,
        }
    }

    /// Installs `summarizer` and builds the service around it.
    pub fn use_summarizer(&mut self, scripted: ScriptedSummarizer) {
        let summarizer = Arc::new(scripted);
        self.service = Some(TaskLifecycleService::new(
            Arc::clone(&self.repository),
            Arc::clone(&summarizer),
            Arc::new(DefaultClock),
        ));
        self.summarizer = Some(summarizer);
    }

    /// Returns the service, failing when no summarizer step ran.
    pub fn service(&self) -> Result<&TestTaskService, eyre::Report> {
        self.service
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing summarizer step in scenario"))
    }

    /// Returns the current task, failing when none was created.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.current_task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing created task in scenario world"))
    }
}

impl Default for TaskAnalysisWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskAnalysisWorld {
    TaskAnalysisWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
