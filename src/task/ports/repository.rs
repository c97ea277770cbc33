//! Repository port for task persistence and per-task atomic mutation.

use crate::task::domain::{AiSummary, Task, TaskChanges, TaskId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Every mutation is atomic with respect to a single task and mutations on
/// the same identifier are serialized. Mutations on different identifiers do
/// not wait on each other.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a newly created task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists or [`TaskRepositoryError::Persistence`] when storage fails.
    async fn create(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns every task in insertion order.
    async fn list(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Applies title and description edits and returns the updated task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, id: TaskId, changes: &TaskChanges) -> TaskRepositoryResult<Task>;

    /// Records the AI summary for a task that has none.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist
    /// and [`TaskRepositoryError::AlreadySummarized`] when a summary is
    /// already stored.
    async fn set_summary(
        &self,
        id: TaskId,
        summary: AiSummary,
        analyzed_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Task>;

    /// Removes a task and returns its last stored state.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<Task>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The task already has a summary.
    #[error("task already summarized: {0}")]
    AlreadySummarized(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
