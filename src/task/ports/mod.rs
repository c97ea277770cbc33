//! Port contracts for task lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod notifier;
pub mod repository;
pub mod summarizer;

pub use notifier::{NoopTaskNotifier, TaskEventNotifier};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
pub use summarizer::{Summarizer, SummarizerError, SummarizerResult};
