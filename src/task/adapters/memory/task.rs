//! In-memory task repository with per-task locking.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use crate::task::{
    domain::{AiSummary, Task, TaskChanges, TaskDomainError, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// The index lock is only held long enough to find or insert a slot. Each
/// task lives in its own slot mutex, so writers on one task never wait for
/// writers on another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    index: Arc<RwLock<TaskIndex>>,
}

#[derive(Debug, Default)]
struct TaskIndex {
    slots: HashMap<TaskId, Arc<TaskSlot>>,
    order: BTreeMap<u64, TaskId>,
    next_position: u64,
}

/// A task and its insertion position. `None` once deleted.
#[derive(Debug)]
struct TaskSlot {
    position: u64,
    task: Mutex<Option<Task>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, id: TaskId) -> TaskRepositoryResult<Option<Arc<TaskSlot>>> {
        let index = self.index.read().map_err(poisoned)?;
        Ok(index.slots.get(&id).cloned())
    }

    fn slot_or_not_found(&self, id: TaskId) -> TaskRepositoryResult<Arc<TaskSlot>> {
        self.slot(id)?.ok_or(TaskRepositoryError::NotFound(id))
    }

    fn unlink(&self, id: TaskId, position: u64) -> TaskRepositoryResult<()> {
        let mut index = self.index.write().map_err(poisoned)?;
        index.slots.remove(&id);
        index.order.remove(&position);
        Ok(())
    }
}

impl TaskSlot {
    fn lock(&self) -> TaskRepositoryResult<MutexGuard<'_, Option<Task>>> {
        self.task.lock().map_err(poisoned)
    }
}

fn poisoned<E: std::fmt::Display>(err: E) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Runs `mutate` on the live task in `slot`, reporting a deleted slot as
/// missing.
fn with_live_task<T>(
    slot: &TaskSlot,
    id: TaskId,
    mutate: impl FnOnce(&mut Task) -> TaskRepositoryResult<T>,
) -> TaskRepositoryResult<T> {
    let mut guard = slot.lock()?;
    let task = guard.as_mut().ok_or(TaskRepositoryError::NotFound(id))?;
    mutate(task)
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut index = self.index.write().map_err(poisoned)?;
        if index.slots.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }

        let position = index.next_position;
        index.next_position += 1;
        index.order.insert(position, task.id());
        index.slots.insert(
            task.id(),
            Arc::new(TaskSlot {
                position,
                task: Mutex::new(Some(task.clone())),
            }),
        );
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let Some(slot) = self.slot(id)? else {
            return Ok(None);
        };
        let guard = slot.lock()?;
        Ok(guard.clone())
    }

    async fn list(&self) -> TaskRepositoryResult<Vec<Task>> {
        let slots: Vec<Arc<TaskSlot>> = {
            let index = self.index.read().map_err(poisoned)?;
            index
                .order
                .values()
                .filter_map(|id| index.slots.get(id).cloned())
                .collect()
        };

        let mut tasks = Vec::with_capacity(slots.len());
        for slot in slots {
            if let Some(task) = slot.lock()?.clone() {
                tasks.push(task);
            }
        }
        Ok(tasks)
    }

    async fn update(&self, id: TaskId, changes: &TaskChanges) -> TaskRepositoryResult<Task> {
        let slot = self.slot_or_not_found(id)?;
        with_live_task(&slot, id, |task| {
            task.apply_changes(changes);
            Ok(task.clone())
        })
    }

    async fn set_summary(
        &self,
        id: TaskId,
        summary: AiSummary,
        analyzed_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Task> {
        let slot = self.slot_or_not_found(id)?;
        with_live_task(&slot, id, |task| {
            task.record_summary(summary, analyzed_at)
                .map_err(|err| match err {
                    TaskDomainError::AlreadySummarized(task_id) => {
                        TaskRepositoryError::AlreadySummarized(task_id)
                    }
                    other => TaskRepositoryError::persistence(other),
                })?;
            Ok(task.clone())
        })
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<Task> {
        let slot = self.slot_or_not_found(id)?;
        let removed = {
            let mut guard = slot.lock()?;
            guard.take().ok_or(TaskRepositoryError::NotFound(id))?
        };
        self.unlink(id, slot.position)?;
        Ok(removed)
    }
}
