//! Domain model for task lifecycle management.
//!
//! The task domain owns the validated scalar types, the task aggregate and
//! the one-way analysis state machine. Infrastructure concerns stay outside
//! of this boundary.

mod error;
mod ids;
mod task;
mod text;

pub use error::{AnalysisPrecondition, TaskDomainError};
pub use ids::TaskId;
pub use task::{AnalysisState, PersistedTaskData, Task, TaskChanges};
pub use text::{AiSummary, TaskDescription, TaskTitle};
