//! Webhook adapter announcing task deletions to an automation endpoint.

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::task::{
    domain::{Task, TaskId},
    ports::TaskEventNotifier,
};

/// Payload posted when a task is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskDeletedPayload {
    /// Human-readable event description.
    pub message: String,
    /// Identifier of the deleted task.
    pub deleted_id: TaskId,
}

impl TaskDeletedPayload {
    /// Builds the payload for a deleted task.
    #[must_use]
    pub fn for_task(task: &Task) -> Self {
        Self {
            message: format!("Task was deleted: '{}'", task.title()),
            deleted_id: task.id(),
        }
    }
}

/// Notifier that posts lifecycle events as JSON to a fixed URL.
///
/// Delivery runs on a spawned task, so the caller never waits for the
/// endpoint. Failures are only logged.
#[derive(Debug, Clone)]
pub struct WebhookTaskNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookTaskNotifier {
    /// Creates a notifier posting to `url`.
    ///
    /// # Errors
    ///
    /// Returns [`reqwest::Error`] when the HTTP client cannot be built.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

async fn deliver(client: reqwest::Client, url: String, payload: TaskDeletedPayload) {
    let task_id = payload.deleted_id;
    let outcome = client
        .post(&url)
        .json(&payload)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status);

    match outcome {
        Ok(_) => debug!(task_id = %task_id, "deletion webhook delivered"),
        Err(err) => warn!(task_id = %task_id, error = %err, "deletion webhook failed"),
    }
}

#[async_trait]
impl TaskEventNotifier for WebhookTaskNotifier {
    async fn task_deleted(&self, task: &Task) {
        let payload = TaskDeletedPayload::for_task(task);
        tokio::spawn(deliver(self.client.clone(), self.url.clone(), payload));
    }
}
