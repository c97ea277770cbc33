//! Wire representations of tasks and request bodies.

use crate::task::domain::Task;
use serde::{Deserialize, Serialize};

/// Task as seen by HTTP clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResponse {
    /// Task identifier.
    pub id: String,
    /// Task title.
    pub title: String,
    /// Task description; empty when absent.
    pub description: String,
    /// AI summary; `null` until analyzed.
    pub ai_summary: Option<String>,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().to_string(),
            title: task.title().as_str().to_owned(),
            description: task.description().as_str().to_owned(),
            ai_summary: task.ai_summary().map(|summary| summary.as_str().to_owned()),
        }
    }
}

/// Body of a create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTaskBody {
    /// Required title.
    pub title: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of an update request. `null` and missing fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTaskBody {
    /// Replacement title.
    #[serde(default)]
    pub title: Option<String>,
    /// Replacement description.
    #[serde(default)]
    pub description: Option<String>,
}
