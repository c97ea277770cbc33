//! Service layer for task creation, editing, deletion and AI analysis.

use crate::task::{
    domain::{
        AiSummary, AnalysisPrecondition, Task, TaskChanges, TaskDescription, TaskDomainError,
        TaskId, TaskTitle,
    },
    ports::{
        NoopTaskNotifier, Summarizer, SummarizerError, TaskEventNotifier, TaskRepository,
        TaskRepositoryError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Default upper bound for a single summarizer call.
pub const DEFAULT_ANALYSIS_TIMEOUT: Duration = Duration::from_secs(30);

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Request payload for editing a task's title and description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    task_id: TaskId,
    title: Option<String>,
    description: Option<String>,
}

impl UpdateTaskRequest {
    /// Creates a request that changes nothing yet.
    #[must_use]
    pub const fn new(task_id: TaskId) -> Self {
        Self {
            task_id,
            title: None,
            description: None,
        }
    }

    /// Sets the replacement title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Caller input failed validation.
    #[error("validation failed: {0}")]
    Validation(TaskDomainError),

    /// No task exists with the given identifier.
    #[error("task {0} not found")]
    NotFound(TaskId),

    /// An analysis guard rejected the request.
    #[error("precondition failed: {0}")]
    PreconditionFailed(AnalysisPrecondition),

    /// The summarizer failed or timed out.
    #[error("analysis failed: {0}")]
    AnalysisFailed(#[source] SummarizerError),

    /// The task store could not complete the operation.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[source] TaskRepositoryError),
}

impl From<TaskDomainError> for TaskLifecycleError {
    fn from(err: TaskDomainError) -> Self {
        match err {
            TaskDomainError::NotAnalyzable { precondition, .. } => {
                Self::PreconditionFailed(precondition)
            }
            TaskDomainError::AlreadySummarized(_) => {
                Self::PreconditionFailed(AnalysisPrecondition::AlreadyAnalyzed)
            }
            other @ (TaskDomainError::EmptyTitle
            | TaskDomainError::EmptySummary
            | TaskDomainError::NulCharacter { .. }) => Self::Validation(other),
        }
    }
}

impl From<TaskRepositoryError> for TaskLifecycleError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            TaskRepositoryError::AlreadySummarized(_) => {
                Self::PreconditionFailed(AnalysisPrecondition::AlreadyAnalyzed)
            }
            other => Self::StorageUnavailable(other),
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// This is the only component that mutates tasks. It re-checks every
/// analysis guard regardless of what a client has already checked.
#[derive(Clone)]
pub struct TaskLifecycleService<R, S, C>
where
    R: TaskRepository,
    S: Summarizer,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    summarizer: Arc<S>,
    clock: Arc<C>,
    notifier: Arc<dyn TaskEventNotifier>,
    analysis_timeout: Duration,
}

impl<R, S, C> TaskLifecycleService<R, S, C>
where
    R: TaskRepository,
    S: Summarizer,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub fn new(repository: Arc<R>, summarizer: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            repository,
            summarizer,
            clock,
            notifier: Arc::new(NoopTaskNotifier),
            analysis_timeout: DEFAULT_ANALYSIS_TIMEOUT,
        }
    }

    /// Sets the upper bound for a single summarizer call.
    #[must_use]
    pub fn with_analysis_timeout(mut self, timeout: Duration) -> Self {
        self.analysis_timeout = timeout;
        self
    }

    /// Sets the notifier told about committed deletions.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn TaskEventNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    async fn find_task_or_error(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(task_id))
    }

    /// Creates a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Validation`] when the title is blank and
    /// [`TaskLifecycleError::StorageUnavailable`] when persistence fails.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let title = TaskTitle::new(request.title)?;
        let description = TaskDescription::from_optional(request.description)?;
        let task = Task::new(title, description, &*self.clock);
        self.repository.create(&task).await?;
        info!(task_id = %task.id(), "task created");
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist.
    pub async fn get_task(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.find_task_or_error(task_id).await
    }

    /// Lists all tasks in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::StorageUnavailable`] when persistence
    /// lookup fails.
    pub async fn list_tasks(&self) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.list().await?)
    }

    /// Edits a task's title and description.
    ///
    /// Existence is checked before the title, so an unknown identifier always
    /// yields [`TaskLifecycleError::NotFound`]. The AI summary is never
    /// changed by this operation.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist
    /// and [`TaskLifecycleError::Validation`] when the new title is blank.
    pub async fn update_task(&self, request: UpdateTaskRequest) -> TaskLifecycleResult<Task> {
        let UpdateTaskRequest {
            task_id,
            title,
            description,
        } = request;
        self.find_task_or_error(task_id).await?;

        let mut changes = TaskChanges::new(&*self.clock);
        if let Some(new_title) = title {
            changes = changes.with_title(TaskTitle::new(new_title)?);
        }
        if let Some(new_description) = description {
            changes = changes.with_description(TaskDescription::new(new_description)?);
        }

        let updated = self.repository.update(task_id, &changes).await?;
        info!(task_id = %task_id, "task updated");
        Ok(updated)
    }

    /// Deletes a task irreversibly and notifies the configured notifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist.
    pub async fn delete_task(&self, task_id: TaskId) -> TaskLifecycleResult<()> {
        let removed = self.repository.delete(task_id).await?;
        info!(task_id = %task_id, "task deleted");
        self.notifier.task_deleted(&removed).await;
        Ok(())
    }

    /// Summarizes a task's description and records the summary once.
    ///
    /// A concurrent analysis that commits first turns this call into a no-op
    /// returning the stored task. A concurrent deletion is reported as
    /// [`TaskLifecycleError::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist,
    /// [`TaskLifecycleError::PreconditionFailed`] when the description is
    /// blank or the task is already analyzed, and
    /// [`TaskLifecycleError::AnalysisFailed`] when the summarizer fails or
    /// exceeds the analysis timeout.
    pub async fn analyze_task(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        let task = self.find_task_or_error(task_id).await?;
        let source = task.analysis_source()?;

        let summary = self.summarize(task_id, source.as_str()).await?;

        match self
            .repository
            .set_summary(task_id, summary, self.clock.utc())
            .await
        {
            Ok(analyzed) => {
                info!(task_id = %task_id, "task analyzed");
                Ok(analyzed)
            }
            Err(TaskRepositoryError::AlreadySummarized(_)) => {
                debug!(task_id = %task_id, "concurrent analysis committed first");
                self.find_task_or_error(task_id).await
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn summarize(&self, task_id: TaskId, text: &str) -> TaskLifecycleResult<AiSummary> {
        let outcome = tokio::time::timeout(self.analysis_timeout, self.summarizer.summarize(text))
            .await
            .unwrap_or(Err(SummarizerError::Timeout(self.analysis_timeout)))
            .and_then(|reply| {
                AiSummary::new(reply)
                    .map_err(|err| SummarizerError::MalformedResponse(err.to_string()))
            });

        outcome.map_err(|err| {
            warn!(task_id = %task_id, error = %err, "task analysis failed");
            TaskLifecycleError::AnalysisFailed(err)
        })
    }
}
