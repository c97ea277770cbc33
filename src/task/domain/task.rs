//! Task aggregate root and the analysis state machine.

use super::{AiSummary, AnalysisPrecondition, TaskDescription, TaskDomainError, TaskId, TaskTitle};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Analysis state derived from the presence of an AI summary.
///
/// `Unanalyzed` is the initial state and `Analyzed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisState {
    /// No summary has been recorded yet.
    Unanalyzed,
    /// A summary has been recorded.
    Analyzed,
}

impl AnalysisState {
    /// Returns `true` when no transition leaves this state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Analyzed)
    }
}

/// Title and description edits applied by an update.
///
/// Fields left as `None` keep their stored value. There is deliberately no
/// summary field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskChanges {
    title: Option<TaskTitle>,
    description: Option<TaskDescription>,
    updated_at: DateTime<Utc>,
}

impl TaskChanges {
    /// Creates an empty change set stamped with the current clock time.
    #[must_use]
    pub fn new(clock: &impl Clock) -> Self {
        Self {
            title: None,
            description: None,
            updated_at: clock.utc(),
        }
    }

    /// Sets the replacement title.
    #[must_use]
    pub fn with_title(mut self, title: TaskTitle) -> Self {
        self.title = Some(title);
        self
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: TaskDescription) -> Self {
        self.description = Some(description);
        self
    }

    /// Returns the replacement title, if any.
    #[must_use]
    pub const fn title(&self) -> Option<&TaskTitle> {
        self.title.as_ref()
    }

    /// Returns the replacement description, if any.
    #[must_use]
    pub const fn description(&self) -> Option<&TaskDescription> {
        self.description.as_ref()
    }

    /// Returns the timestamp recorded as the task's latest update.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: TaskDescription,
    ai_summary: Option<AiSummary>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: TaskDescription,
    /// Persisted summary, if the task was analyzed.
    pub ai_summary: Option<AiSummary>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new, unanalyzed task with a fresh identifier.
    #[must_use]
    pub fn new(title: TaskTitle, description: TaskDescription, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            title,
            description,
            ai_summary: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            ai_summary: data.ai_summary,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub const fn description(&self) -> &TaskDescription {
        &self.description
    }

    /// Returns the AI summary, if the task was analyzed.
    #[must_use]
    pub const fn ai_summary(&self) -> Option<&AiSummary> {
        self.ai_summary.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the analysis state implied by the summary.
    #[must_use]
    pub const fn analysis_state(&self) -> AnalysisState {
        if self.ai_summary.is_some() {
            AnalysisState::Analyzed
        } else {
            AnalysisState::Unanalyzed
        }
    }

    /// Returns the text to summarize when the task may be analyzed.
    ///
    /// The description guard is checked before the terminal-state guard.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotAnalyzable`] when the description is
    /// blank or a summary is already present.
    pub fn analysis_source(&self) -> Result<&TaskDescription, TaskDomainError> {
        if self.description.is_blank() {
            return Err(self.not_analyzable(AnalysisPrecondition::DescriptionRequired));
        }
        if self.analysis_state().is_terminal() {
            return Err(self.not_analyzable(AnalysisPrecondition::AlreadyAnalyzed));
        }
        Ok(&self.description)
    }

    /// Applies title and description edits. The summary is never touched.
    pub fn apply_changes(&mut self, changes: &TaskChanges) {
        if let Some(title) = changes.title() {
            self.title = title.clone();
        }
        if let Some(description) = changes.description() {
            self.description = description.clone();
        }
        self.updated_at = changes.updated_at();
    }

    /// Records the AI summary, moving the task to [`AnalysisState::Analyzed`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AlreadySummarized`] if a summary is already
    /// present; the existing summary is kept.
    pub fn record_summary(
        &mut self,
        summary: AiSummary,
        analyzed_at: DateTime<Utc>,
    ) -> Result<(), TaskDomainError> {
        if self.ai_summary.is_some() {
            return Err(TaskDomainError::AlreadySummarized(self.id));
        }
        self.ai_summary = Some(summary);
        self.updated_at = analyzed_at;
        Ok(())
    }

    const fn not_analyzable(&self, precondition: AnalysisPrecondition) -> TaskDomainError {
        TaskDomainError::NotAnalyzable {
            task_id: self.id,
            precondition,
        }
    }
}
