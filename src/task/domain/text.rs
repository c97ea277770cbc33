//! Validated text values carried by a task.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rejects text that storage cannot hold.
fn reject_nul(value: &str, field: &'static str) -> Result<(), TaskDomainError> {
    if value.contains('\0') {
        return Err(TaskDomainError::NulCharacter { field });
    }
    Ok(())
}

/// Task title that is non-empty after trimming.
///
/// The stored value keeps the caller's original spacing; only the emptiness
/// check looks at the trimmed text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated task title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the value is empty after
    /// trimming whitespace and [`TaskDomainError::NulCharacter`] when it
    /// contains a NUL character.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        reject_nul(&raw, "title")?;
        Ok(Self(raw))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TaskTitle {
    type Error = TaskDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskTitle> for String {
    fn from(value: TaskTitle) -> Self {
        value.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-form task description. An absent description is the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskDescription(String);

impl TaskDescription {
    /// Creates a description from any text, including the empty string.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NulCharacter`] when the value contains a
    /// NUL character.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        reject_nul(&raw, "description")?;
        Ok(Self(raw))
    }

    /// Creates a description from an optional value, treating `None` as empty.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NulCharacter`] when the value contains a
    /// NUL character.
    pub fn from_optional(value: Option<String>) -> Result<Self, TaskDomainError> {
        value.map_or_else(|| Ok(Self::default()), Self::new)
    }

    /// Returns `true` when there is nothing to summarize.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Returns the description as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TaskDescription {
    type Error = TaskDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskDescription> for String {
    fn from(value: TaskDescription) -> Self {
        value.0
    }
}

impl AsRef<str> for TaskDescription {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// AI-generated one-line summary of a task description.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AiSummary(String);

impl AiSummary {
    /// Creates a summary from generated text, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptySummary`] when nothing remains after
    /// trimming and [`TaskDomainError::NulCharacter`] when the text contains
    /// a NUL character.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptySummary);
        }
        reject_nul(trimmed, "summary")?;
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the summary as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AiSummary {
    type Error = TaskDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AiSummary> for String {
    fn from(value: AiSummary) -> Self {
        value.0
    }
}

impl AsRef<str> for AiSummary {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for AiSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
