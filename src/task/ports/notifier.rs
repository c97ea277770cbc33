//! Notification port for task lifecycle events observed outside the core.

use crate::task::domain::Task;
use async_trait::async_trait;

/// Receives lifecycle events after they have been committed.
///
/// Delivery is best-effort: implementations report failures through logging
/// and never affect the outcome of the operation that triggered them.
#[async_trait]
pub trait TaskEventNotifier: Send + Sync {
    /// Called once a task has been removed from the store.
    async fn task_deleted(&self, task: &Task);
}

/// Notifier that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTaskNotifier;

#[async_trait]
impl TaskEventNotifier for NoopTaskNotifier {
    async fn task_deleted(&self, _task: &Task) {}
}
