//! Error types for task domain validation.

use super::TaskId;
use std::fmt;
use thiserror::Error;

/// Guard that blocks a task from being analyzed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisPrecondition {
    /// The task has no description to summarize.
    DescriptionRequired,
    /// The task already carries a summary.
    AlreadyAnalyzed,
}

impl AnalysisPrecondition {
    /// Returns the client-facing reason text.
    #[must_use]
    pub const fn reason(self) -> &'static str {
        match self {
            Self::DescriptionRequired => "description required",
            Self::AlreadyAnalyzed => "already analyzed",
        }
    }
}

impl fmt::Display for AnalysisPrecondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The summary text is empty after trimming.
    #[error("task summary must not be empty")]
    EmptySummary,

    /// The text contains a NUL character, which storage cannot hold.
    #[error("task {field} must not contain NUL characters")]
    NulCharacter {
        /// Name of the rejected field.
        field: &'static str,
    },

    /// An analysis guard rejected the task.
    #[error("task {task_id} cannot be analyzed: {precondition}")]
    NotAnalyzable {
        /// Task identifier.
        task_id: TaskId,
        /// Guard that failed.
        precondition: AnalysisPrecondition,
    },

    /// The task already has a summary and cannot take another.
    #[error("task {0} already has a summary")]
    AlreadySummarized(TaskId),
}
